//! gekicatalog 命令行：浏览构建目录、解析装备阶段、导入视频订阅源

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use gekicatalog::{
    BuildLibrary, CatalogLoader, ConfigManager, ContentCategory, FeedFetcher, FeedIngestor, FeedSource, GlobalConfig,
    Query, ThumbnailResolver, UNCATEGORIZED_LABEL, VideoClassifier,
};

#[derive(Debug, Parser)]
#[command(name = "gekicatalog", version, about = "GekiGaming RagnaTales build catalog")]
struct Cli {
    /// 本地目录文件（默认使用内置目录）
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// 输出调试日志
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// 过滤构建列表
    Builds(BuildsArgs),
    /// 显示某个构建在指定阶段的生效装备
    Stage(StageArgs),
    /// 按内容分类浏览文章
    Articles(ArticlesArgs),
    /// 搜索提示
    Hints(HintsArgs),
    /// 导入视频订阅源并生成目录文件
    Ingest(IngestArgs),
}

#[derive(Debug, Args)]
struct BuildsArgs {
    /// 职业或职业分组
    #[arg(long)]
    class: Option<String>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long, value_parser = parse_category)]
    category: Option<ContentCategory>,
}

#[derive(Debug, Args)]
struct StageArgs {
    /// 构建 id 或 slug
    identifier: String,
    /// 阶段下标，越界时按 0 处理
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    index: i64,
}

#[derive(Debug, Args)]
struct ArticlesArgs {
    #[arg(long, value_parser = parse_category)]
    category: Option<ContentCategory>,
}

#[derive(Debug, Args)]
struct HintsArgs {
    #[arg(default_value = "")]
    input: String,
}

#[derive(Debug, Args)]
struct IngestArgs {
    /// 本地 JSON Lines 文件或远程地址
    #[arg(long, conflicts_with = "yt_dlp", required_unless_present = "yt_dlp")]
    source: Option<String>,
    /// 通过 yt-dlp 拉取的频道地址
    #[arg(long = "yt-dlp")]
    yt_dlp: Option<String>,
    /// yt-dlp 可执行文件路径（默认从 PATH 查找）
    #[arg(long = "yt-dlp-bin", requires = "yt_dlp")]
    yt_dlp_bin: Option<PathBuf>,
    /// 探测 maxres 缩略图是否存在
    #[arg(long)]
    check_thumbnails: bool,
    /// 输出目录文件
    #[arg(long)]
    out: PathBuf,
    /// 额外输出导入报告
    #[arg(long)]
    report: Option<PathBuf>,
}

fn parse_category(value: &str) -> Result<ContentCategory, String> {
    value.parse().map_err(|e: gekicatalog::CatalogError| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = ConfigManager::custom().verbose(cli.verbose);
    if let Some(path) = &cli.catalog {
        builder = builder.local_catalog(path);
    }
    let config = builder.build();

    let default_level = if config.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Commands::Builds(args) => run_builds(args, config).await,
        Commands::Stage(args) => run_stage(args, config).await,
        Commands::Articles(args) => run_articles(args, config).await,
        Commands::Hints(args) => run_hints(args, config).await,
        Commands::Ingest(args) => run_ingest(args, config).await,
    }
}

async fn load_library(config: GlobalConfig) -> Result<BuildLibrary> {
    BuildLibrary::new(config).await.context("加载构建目录失败")
}

async fn run_builds(args: BuildsArgs, config: GlobalConfig) -> Result<()> {
    let library = load_library(config).await?;

    let mut query = Query::new();
    if let Some(class) = args.class {
        query = query.class_filter(class);
    }
    if let Some(term) = args.search {
        query = query.search(term);
    }
    if let Some(category) = args.category {
        query = query.category(category);
    }

    let outcome = library.filter(&query);
    println!("{}", outcome.title);
    if outcome.is_empty() {
        println!("  (no results)");
    }
    for record in &outcome.results {
        println!("  {}", record);
    }
    Ok(())
}

async fn run_stage(args: StageArgs, config: GlobalConfig) -> Result<()> {
    let library = load_library(config).await?;

    let Some(record) = library.find(&args.identifier) else {
        bail!("找不到构建：{}", args.identifier);
    };
    let Some(stage) = library.resolve_stage(&args.identifier, args.index) else {
        bail!("构建 {} 没有装备阶段", record.id);
    };

    println!("{} - {} (#{})", record.title, stage.label, stage.index);
    for line in stage.stat_lines() {
        println!("  {}", line);
    }
    for (slot, item) in stage.slots() {
        println!("  {:<12} {}", slot.label(), item.unwrap_or("-"));
    }
    if let Some(pet) = stage.pet {
        println!("  Pet: {}", pet.join(", "));
    }
    Ok(())
}

async fn run_articles(args: ArticlesArgs, config: GlobalConfig) -> Result<()> {
    let library = load_library(config).await?;

    let heading = args.category.map(|c| c.short_label()).unwrap_or("All");
    println!("{}", heading);
    for record in library.articles(args.category) {
        println!("  {} [{}]", record, record.category.short_label());
    }
    Ok(())
}

async fn run_hints(args: HintsArgs, config: GlobalConfig) -> Result<()> {
    let library = load_library(config).await?;
    for hint in library.suggest(&args.input) {
        println!("{}", hint);
    }
    Ok(())
}

async fn run_ingest(args: IngestArgs, config: GlobalConfig) -> Result<()> {
    let source = match (args.source, args.yt_dlp) {
        (_, Some(channel_url)) => FeedSource::YtDlp { channel_url },
        (Some(location), None) => FeedSource::from_location(&location),
        (None, None) => bail!("需要 --source 或 --yt-dlp"),
    };
    let config = GlobalConfig {
        check_thumbnails: args.check_thumbnails,
        ..config
    };

    let ingestor = match &args.yt_dlp_bin {
        Some(program) => FeedIngestor::with_parts(
            FeedFetcher::new(&config)?.with_program(program, Vec::<String>::new()),
            VideoClassifier::with_default_rules()?,
            ThumbnailResolver::new(&config)?,
        ),
        None => FeedIngestor::new(&config)?,
    };
    let report = ingestor
        .run(&source)
        .await
        .context("订阅源导入失败")?;

    if let Some(path) = &args.report {
        tokio::fs::write(path, serde_json::to_string_pretty(&report)?)
            .await
            .with_context(|| format!("写入报告失败：{}", path.display()))?;
    }

    let records = report.to_records(&config.author);
    if records.is_empty() {
        bail!("没有可导入的视频");
    }

    let base = CatalogLoader::load_base(&config).await?;
    let catalog = CatalogLoader::prepare(CatalogLoader::merge_feed(base, records), &config)?;
    tokio::fs::write(&args.out, serde_json::to_string_pretty(&catalog)?)
        .await
        .with_context(|| format!("写入目录失败：{}", args.out.display()))?;

    info!("目录已写入 {}，记录数：{}", args.out.display(), catalog.builds.len());
    println!("{} records -> {}", catalog.builds.len(), args.out.display());
    for (category, count) in report.category_counts() {
        println!("  {}: {}", category.short_label(), count);
    }
    let uncategorized = report.uncategorized_count();
    if uncategorized > 0 {
        println!("  {}: {}", UNCATEGORIZED_LABEL, uncategorized);
    }
    Ok(())
}
