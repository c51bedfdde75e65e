use clap::Parser;
use garment_predict::{config::Config, predict::PredictPipeline, PredictError};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "predict")]
#[command(about = "Garment category, color and condition prediction from a single image")]
struct Args {
    /// 待预测的图片路径
    image_path: Option<PathBuf>,

    /// 模型文件目录
    #[arg(long, default_value = "models")]
    models_dir: String,

    /// 模型拓扑 ("combined", "split")
    #[arg(long, default_value = "split")]
    topology: String,

    /// 标签大小写策略 ("title", "sentence")
    #[arg(long, default_value = "sentence")]
    casing: String,

    /// 输出格式 ("text", "json")
    #[arg(long, default_value = "json")]
    format: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    // 初始化日志系统，写stderr，stdout留给预测结果
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            // 用法错误只打印用法行，其余带错误码前缀
            match &err {
                PredictError::Usage(message) => eprintln!("{}", message),
                _ => eprintln!("{}: {}", err.error_code(), err),
            }
            std::process::exit(err.exit_code());
        }
    }
}

/// 参数检查在模型加载之前，缺参数时不付加载成本
fn run(args: Args) -> Result<String, PredictError> {
    let image_path = args
        .image_path
        .ok_or_else(|| PredictError::Usage("Usage: predict <image_path>".to_string()))?;

    let config = Config::new(args.models_dir, &args.topology, &args.casing, &args.format)?;

    tracing::info!("Models directory: {}", config.models_dir.display());
    tracing::info!("Image: {}", image_path.display());

    let pipeline = PredictPipeline::new(config)?;
    let prediction = pipeline.predict_path(&image_path)?;
    pipeline.render(&prediction)
}
