use std::{fs, fs::OpenOptions, path::PathBuf};

use chrono::Local;
use color_eyre::eyre;
use tracing_appender::non_blocking;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Tracing guards를 보관하는 구조체
/// 이 구조체가 drop되기 전까지 로깅이 계속 작동합니다
pub struct TracingGuards {
    _file: non_blocking::WorkerGuard,
    _stdout: non_blocking::WorkerGuard,
}

/// Tracing 초기화
/// 파일 로깅과 stdout 로깅을 모두 설정합니다. RUST_LOG 가 없으면 info.
pub fn init_tracing(base_dir: &str, prefix: &str) -> eyre::Result<TracingGuards> {
    // 1) 파일 appender
    let (file_writer, file_guard) = custom_daily_file_appender(base_dir, prefix)?;

    // 2) stdout도 non-blocking
    let (stdout_writer, stdout_guard) = non_blocking(std::io::stdout());

    // 3) EnvFilter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 파일에는 INFO 이상, 요청 URL 은 debug 라서 남지 않는다
    let file_filter = EnvFilter::new("info");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(file_filter),
        )
        .with(fmt::layer().with_writer(stdout_writer).with_ansi(true))
        .try_init()?;

    Ok(TracingGuards {
        _file: file_guard,
        _stdout: stdout_guard,
    })
}

/// `logs/okex-swap.2025-11-29.log` 형식으로 파일을 생성합니다
fn custom_daily_file_appender(
    base_dir: &str,
    prefix: &str,
) -> eyre::Result<(non_blocking::NonBlocking, non_blocking::WorkerGuard)> {
    fs::create_dir_all(base_dir)?;

    let path = log_file_path(base_dir, prefix, &Local::now().format("%Y-%m-%d").to_string());
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Ok(non_blocking(file))
}

fn log_file_path(base_dir: &str, prefix: &str, date: &str) -> PathBuf {
    let mut path = PathBuf::from(base_dir);
    path.push(format!("{prefix}.{date}.log"));
    path
}
