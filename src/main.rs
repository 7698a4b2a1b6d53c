use std::fmt::Debug;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use leanback_profiles::capabilities::DeviceCapabilities;
use leanback_profiles::document::{DocumentFormat, ProfileDocument, load_profile};
use leanback_profiles::image::{ImageFormat, ImageQuery, ImageResolver, ImageRole, LibraryItem};
use leanback_profiles::players::PlayerKind;
use leanback_profiles::preferences::{AudioCodecOut, UserSettings};
use leanback_profiles::profile::DlnaProfileType;
use leanback_profiles::validation::validate_profile;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, prelude::*};

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_tracing()?;

    match cli.command {
        Commands::Players => {
            list_players();
            Ok(())
        }
        Commands::Capabilities { file } => show_capabilities(file.as_deref()),
        Commands::Profile(args) => build_profile(args),
        Commands::Lint { profiles } => lint_profiles(&profiles),
        Commands::Diff { lhs, rhs } => diff_profiles(&lhs, &rhs),
        Commands::Image(args) => resolve_image(args),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn configure_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries profiles and URLs; logs go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .map_err(|err| anyhow!(err.to_string()))?;

    Ok(())
}

fn list_players() {
    println!("Available players:");
    for kind in PlayerKind::ALL {
        println!(
            "- {:<8} {:<26} {}",
            kind.key(),
            kind.profile_name(),
            kind.description()
        );
    }
}

fn load_capabilities(path: Option<&Path>) -> Result<DeviceCapabilities> {
    match path {
        Some(path) => DeviceCapabilities::load(path),
        None => Ok(DeviceCapabilities::detect().clone()),
    }
}

fn show_capabilities(file: Option<&Path>) -> Result<()> {
    let caps = load_capabilities(file)?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &caps)?;
    writeln!(stdout)?;
    info!(
        hevc = caps.supports_hevc(),
        hevc_main10 = caps.supports_hevc_main10(),
        avc_high10 = caps.supports_avc_high10(),
        "Capability facts reported"
    );
    Ok(())
}

fn build_profile(args: ProfileArgs) -> Result<()> {
    let player: PlayerKind = args.player.parse()?;

    let mut settings = match &args.preferences {
        Some(path) => UserSettings::load(path)?,
        None => UserSettings::default(),
    };
    if let Some(codec) = args.audio_codec {
        settings.forced_audio_codec = codec;
    }
    if args.dts {
        settings.dts_enabled = true;
    }
    if args.extra_surround {
        settings.extra_surround_enabled = true;
    }
    if args.live_tv {
        settings.live_tv = true;
    }

    let prefs = settings.resolve();
    let caps = load_capabilities(args.capabilities.as_deref())?;
    let profile = player.build(&prefs, &caps);

    let report = validate_profile(&profile);
    for warning in &report.warnings {
        warn!(player = %player, "{warning}");
    }
    if !report.is_ok() {
        for error_msg in &report.errors {
            error!(player = %player, "{error_msg}");
        }
        bail!(
            "Assembled profile failed validation with {} error(s)",
            report.errors.len()
        );
    }

    let document = ProfileDocument::new(player, profile);
    match args.output {
        Some(path) => {
            let format = args
                .format
                .unwrap_or_else(|| DocumentFormat::from_path(&path));
            let written = document.write(&path, format)?;
            info!(
                player = %player,
                output = %written.display(),
                fingerprint = %document.fingerprint,
                "Profile document written"
            );
            println!("Profile written to {}", written.display());
        }
        None => {
            let rendered = document.render(args.format.unwrap_or_default())?;
            println!("{}", rendered.trim_end());
        }
    }
    Ok(())
}

fn lint_profiles(profiles: &[PathBuf]) -> Result<()> {
    if profiles.is_empty() {
        bail!("No profile files supplied for linting");
    }

    let mut failures = 0usize;

    for profile_path in profiles {
        match load_profile(profile_path) {
            Ok(profile) => {
                let report = validate_profile(&profile);
                for warning in &report.warnings {
                    warn!(file = %profile_path.display(), "{warning}");
                }
                if report.is_ok() {
                    info!(file = %profile_path.display(), "Lint passed");
                } else {
                    failures += 1;
                    for error_msg in &report.errors {
                        error!(file = %profile_path.display(), "{error_msg}");
                    }
                }
            }
            Err(err) => {
                failures += 1;
                error!(file = %profile_path.display(), "Failed to load profile: {err:#}");
            }
        }
    }

    if failures > 0 {
        bail!("Lint failed for {failures} profile(s)");
    }

    info!("All profile lint checks passed");
    Ok(())
}

fn diff_profiles(lhs: &Path, rhs: &Path) -> Result<()> {
    let left = load_profile(lhs)?;
    let right = load_profile(rhs)?;

    let mut differences = Vec::new();

    if left.name != right.name {
        differences.push(format!("Name differs: '{}' vs '{}'", left.name, right.name));
    }
    compare(
        &mut differences,
        "Max static bitrate",
        &left.max_static_bitrate,
        &right.max_static_bitrate,
    );
    compare(
        &mut differences,
        "Max streaming bitrate",
        &left.max_streaming_bitrate,
        &right.max_streaming_bitrate,
    );
    compare(
        &mut differences,
        "Music transcoding bitrate",
        &left.music_streaming_transcoding_bitrate,
        &right.music_streaming_transcoding_bitrate,
    );

    for media in [
        DlnaProfileType::Video,
        DlnaProfileType::Audio,
        DlnaProfileType::Photo,
    ] {
        compare(
            &mut differences,
            &format!("{media:?} direct play"),
            &left.direct_play(media),
            &right.direct_play(media),
        );
        compare(
            &mut differences,
            &format!("{media:?} transcoding"),
            &left.transcoding(media),
            &right.transcoding(media),
        );
    }

    compare_lists(
        &mut differences,
        "Codec profile",
        &left.codec_profiles,
        &right.codec_profiles,
    );
    compare_lists(
        &mut differences,
        "Container profile",
        &left.container_profiles,
        &right.container_profiles,
    );
    compare_lists(
        &mut differences,
        "Subtitle profile",
        &left.subtitle_profiles,
        &right.subtitle_profiles,
    );

    if differences.is_empty() {
        info!(
            left = %lhs.display(),
            right = %rhs.display(),
            "Profiles are equivalent"
        );
        println!("Profiles match: {} == {}", lhs.display(), rhs.display());
        Ok(())
    } else {
        println!(
            "Profile differences between '{}' and '{}':",
            lhs.display(),
            rhs.display()
        );
        for diff in &differences {
            println!("- {diff}");
        }
        bail!("Profiles differ ({} difference(s) found)", differences.len());
    }
}

fn compare<T: PartialEq + Debug>(differences: &mut Vec<String>, label: &str, left: &T, right: &T) {
    if left != right {
        differences.push(format!("{label} differs: {left:?} vs {right:?}"));
    }
}

fn compare_lists<T: PartialEq + Debug>(
    differences: &mut Vec<String>,
    label: &str,
    left: &[T],
    right: &[T],
) {
    if left.len() != right.len() {
        differences.push(format!(
            "{label} count differs: {} vs {}",
            left.len(),
            right.len()
        ));
    }
    for (idx, (l, r)) in left.iter().zip(right).enumerate() {
        if l != r {
            differences.push(format!("{label} {} differs: {l:?} vs {r:?}", idx + 1));
        }
    }
}

fn resolve_image(args: ImageArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.item)
        .with_context(|| format!("Failed to read item file: {}", args.item.display()))?;
    let item: LibraryItem = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse item JSON: {}", args.item.display()))?;
    let resolver = ImageResolver::new(&args.server)?;

    let resolved = match args.cascade {
        ImageCascade::Item => {
            let query = ImageQuery {
                max_width: args.max_width,
                max_height: args.max_height,
                format: args.format,
                blur: args.blur,
                require_tag: args.require_tag,
                allow_parent_fallback: args.allow_parent,
                prefer_series_fallback: args.prefer_series,
                prefer_season_fallback: args.prefer_season,
            };
            resolver.resolve(&item, args.role, &query)
        }
        ImageCascade::Logo => resolver.resolve_logo(&item, args.max_width, args.series_logo),
        ImageCascade::Card => resolver
            .resolve_card_thumb(&item, args.max_height, args.prefer_parent_thumb)
            .map(|(url, role)| {
                info!(role = %role, "Card artwork role selected");
                url
            }),
        ImageCascade::Background => Some(resolver.background_url(&item, args.max_height)),
    };

    match resolved {
        Some(url) => println!("{url}"),
        None => info!(item = %item.id, role = %args.role, "No image resolved"),
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    name = "leanback-profiles",
    version,
    about = "Playback capability profiles and artwork URLs for a TV media client"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the player families a profile can be built for
    Players,
    /// Show the decoder facts profiles are built from
    Capabilities {
        #[arg(long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },
    /// Assemble a device profile
    Profile(ProfileArgs),
    Lint {
        #[arg(required = true)]
        profiles: Vec<PathBuf>,
    },
    Diff {
        lhs: PathBuf,
        rhs: PathBuf,
    },
    /// Resolve an image URL for a library item
    Image(ImageArgs),
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
struct ProfileArgs {
    #[arg(long)]
    player: String,
    #[arg(long, value_hint = ValueHint::FilePath)]
    preferences: Option<PathBuf>,
    #[arg(long, value_hint = ValueHint::FilePath)]
    capabilities: Option<PathBuf>,
    #[arg(long = "audio-codec", value_enum)]
    audio_codec: Option<AudioCodecOut>,
    #[arg(long)]
    dts: bool,
    #[arg(long = "extra-surround")]
    extra_surround: bool,
    #[arg(long = "live-tv")]
    live_tv: bool,
    #[arg(long, value_enum)]
    format: Option<DocumentFormat>,
    #[arg(long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ImageCascade {
    Item,
    Logo,
    Card,
    Background,
}

#[derive(clap::Args)]
struct ImageArgs {
    #[arg(long, value_hint = ValueHint::FilePath)]
    item: PathBuf,
    #[arg(long, value_enum, default_value_t = ImageRole::Primary)]
    role: ImageRole,
    #[arg(long)]
    server: String,
    #[arg(long, value_enum, default_value_t = ImageCascade::Item)]
    cascade: ImageCascade,
    #[arg(long = "max-width")]
    max_width: Option<u32>,
    #[arg(long = "max-height")]
    max_height: Option<u32>,
    #[arg(long, value_enum)]
    format: Option<ImageFormat>,
    #[arg(long)]
    blur: Option<u32>,
    #[arg(long = "require-tag")]
    require_tag: bool,
    #[arg(long = "allow-parent")]
    allow_parent: bool,
    #[arg(long = "prefer-series")]
    prefer_series: bool,
    #[arg(long = "prefer-season")]
    prefer_season: bool,
    /// Card cascade: try the parent's thumb and backdrop before the item's own art
    #[arg(long = "prefer-parent-thumb")]
    prefer_parent_thumb: bool,
    /// Logo cascade: fall back to the series logo
    #[arg(long = "series-logo")]
    series_logo: bool,
}
