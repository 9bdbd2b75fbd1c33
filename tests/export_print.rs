use laurea::{
    CANVAS_HEIGHT, CANVAS_WIDTH, RecipientProfile, TemplateConfig, encode_png, png_data_url,
    print_document, render_certificate,
};

#[tokio::test]
async fn png_export_decodes_back_to_canvas_size() {
    let cfg = TemplateConfig::builtin();
    let artifact = render_certificate(&cfg, &RecipientProfile::named("Ada Lovelace"))
        .await
        .unwrap();

    let png = encode_png(&artifact).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (CANVAS_WIDTH, CANVAS_HEIGHT));
}

#[tokio::test]
async fn exports_are_idempotent_reads() {
    let cfg = TemplateConfig::builtin();
    let artifact = render_certificate(&cfg, &RecipientProfile::named("Ada Lovelace"))
        .await
        .unwrap();

    let a = encode_png(&artifact).unwrap();
    let b = encode_png(&artifact).unwrap();
    assert_eq!(a, b);

    let url_a = png_data_url(&artifact).unwrap();
    let url_b = png_data_url(&artifact).unwrap();
    assert_eq!(url_a, url_b);
}

#[tokio::test]
async fn print_document_embeds_the_raster_export() {
    let cfg = TemplateConfig::builtin();
    let artifact = render_certificate(&cfg, &RecipientProfile::named("Ada Lovelace"))
        .await
        .unwrap();

    let title = format!("Certificate — {}", cfg.organization);
    let doc = print_document(&artifact, &title).unwrap();

    // Exactly one embedded image carrying the same data URL as the raster
    // export, and exactly two interactive controls.
    let url = png_data_url(&artifact).unwrap();
    assert_eq!(doc.matches("<img").count(), 1);
    assert!(doc.contains(&url));
    assert_eq!(doc.matches("<button").count(), 2);

    // Print media strips the controls and scales the image full-width.
    let media = doc.split("@media print").nth(1).unwrap();
    assert!(media.contains(".toolbar { display: none; }"));
    assert!(media.contains("img.certificate { width: 100%;"));
}
