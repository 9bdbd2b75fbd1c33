use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "laurea", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a certificate to a PNG (and optionally a print document).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Recipient display name.
    #[arg(long)]
    name: String,

    /// Template configuration JSON; the builtin template when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Organization logo image path.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Official stamp image path.
    #[arg(long)]
    stamp: Option<PathBuf>,

    /// Authorized signature image path.
    #[arg(long)]
    signature: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the standalone print document here.
    #[arg(long)]
    print_html: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args).await,
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<laurea::TemplateConfig> {
    let f = File::open(path).with_context(|| format!("open template '{}'", path.display()))?;
    let r = BufReader::new(f);
    let cfg: laurea::TemplateConfig =
        serde_json::from_reader(r).with_context(|| "parse template JSON")?;
    Ok(cfg)
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => read_config_json(path)?,
        None => laurea::TemplateConfig::builtin(),
    };
    if let Some(path) = args.logo {
        cfg.logo = laurea::AssetRef::Path(path);
    }
    if let Some(path) = args.stamp {
        cfg.stamp = laurea::AssetRef::Path(path);
    }
    if let Some(path) = args.signature {
        cfg.signature = laurea::AssetRef::Path(path);
    }
    cfg.validate()?;

    let recipient = laurea::RecipientProfile::named(&args.name);
    let artifact = laurea::render_certificate(&cfg, &recipient).await?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let png = laurea::encode_png(&artifact)?;
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());

    if let Some(html_path) = args.print_html {
        let title = format!("Certificate — {}", cfg.organization);
        let doc = laurea::print_document(&artifact, &title)?;
        std::fs::write(&html_path, doc)
            .with_context(|| format!("write print document '{}'", html_path.display()))?;
        eprintln!("wrote {}", html_path.display());
    }

    Ok(())
}
