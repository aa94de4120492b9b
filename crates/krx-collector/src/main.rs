//! KRX 전종목 시세 수집 CLI.

use clap::{Parser, Subcommand};
use krx_collector::modules::{self, CollectTarget, RetryPolicy};
use krx_collector::{CollectionStats, CollectorConfig};
use krx_core::{init_logging, BusinessDay, LogConfig};
use krx_data::KrxClient;
use rand::Rng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "krx-collector")]
#[command(about = "KRX end-of-day stock price collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 경로 (없으면 기본값과 환경 변수만 사용)
    #[arg(long, global = true, default_value = "config/default.toml")]
    config: PathBuf,

    /// 로그 레벨 (trace, debug, info, warn, error). 지정하지 않으면 설정 파일 값 사용
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 가장 최근 영업일 조회
    BusinessDay,

    /// 전종목 시세 수집 (1회)
    Fetch {
        /// 조회 일자 (YYYYMMDD). 없으면 가장 최근 영업일
        #[arg(long)]
        date: Option<String>,

        /// 결과를 JSON으로 표준 출력에 기록
        #[arg(long)]
        json: bool,

        /// 숫자 타입으로 정규화한 결과 출력
        #[arg(long)]
        normalize: bool,

        /// 재시도 없이 한 번만 요청
        #[arg(long)]
        no_retry: bool,
    },

    /// 데몬 모드: 주기적으로 최근 영업일 시세 수집
    Daemon,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 설정 로드
    let config = CollectorConfig::load(Some(cli.config.as_path()))?;

    // 로깅 초기화
    let mut log_config = LogConfig::from(&config.app.logging);
    if let Some(level) = cli.log_level {
        // 명시한 레벨은 RUST_LOG보다 우선
        log_config.level = level;
        log_config = log_config.with_env_override(false);
    }
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format.parse()?);
    }
    init_logging(log_config)?;

    tracing::info!("KRX Collector 시작");
    tracing::debug!(
        otp_url = %config.app.portal.otp_url,
        csv_url = %config.app.portal.csv_url,
        market = %config.app.portal.market_id,
        "설정 로드 완료"
    );

    let client = KrxClient::new(config.app.portal.clone())?;

    // 명령 실행
    match cli.command {
        Commands::BusinessDay => {
            let policy = RetryPolicy::from(&config.retry);
            let mut stats = CollectionStats::new();
            let day =
                modules::run_with_retry(&policy, &mut stats, || client.resolve_business_day())
                    .await?;
            println!("{}", day);
        }
        Commands::Fetch {
            date,
            json,
            normalize,
            no_retry,
        } => {
            let target = match date {
                Some(date) => CollectTarget::Date(date.parse::<BusinessDay>()?),
                None => CollectTarget::Latest,
            };
            let policy = if no_retry {
                RetryPolicy::no_retry()
            } else {
                RetryPolicy::from(&config.retry)
            };

            let (snapshot, stats) = modules::collect_snapshot(&client, &policy, target).await?;
            stats.log_summary("전종목 시세 수집");

            if normalize {
                let prices = modules::normalize_snapshot(&snapshot)?;
                if json {
                    println!("{}", modules::render_json(&prices)?);
                } else {
                    tracing::info!(count = prices.len(), "정규화 완료");
                }
            } else if json {
                println!("{}", modules::render_json(&snapshot)?);
            }
        }
        Commands::Daemon => {
            tracing::info!(
                interval_secs = config.daemon.interval_secs,
                jitter_max_secs = config.daemon.jitter_max_secs,
                "=== 데몬 모드 시작 ==="
            );

            let policy = RetryPolicy::from(&config.retry);

            // 수집 중과 대기 중 모두 종료 신호를 받음
            let shutdown = tokio::signal::ctrl_c();
            tokio::pin!(shutdown);

            loop {
                tokio::select! {
                    _ = &mut shutdown => {
                        tracing::info!("종료 신호 수신, 수집 중단 후 데몬 종료 중...");
                        break;
                    }
                    result = modules::collect_snapshot(&client, &policy, CollectTarget::Latest) => {
                        match result {
                            Ok((_, stats)) => stats.log_summary("전종목 시세 수집"),
                            Err(e) => tracing::error!("전종목 시세 수집 실패: {}", e),
                        }
                    }
                }

                let jitter = rand::thread_rng().gen_range(0..=config.daemon.jitter_max_secs);
                let wait = config
                    .daemon
                    .interval()
                    .saturating_add(std::time::Duration::from_secs(jitter));
                tracing::info!(next_in_secs = wait.as_secs(), "다음 수집 대기");

                tokio::select! {
                    _ = &mut shutdown => {
                        tracing::info!("종료 신호 수신, 데몬 종료 중...");
                        break;
                    }
                    _ = tokio::time::sleep(wait) => {}
                }
            }
        }
    }

    tracing::info!("KRX Collector 종료");

    Ok(())
}
