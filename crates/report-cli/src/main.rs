//! 상품 비교 리포트 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 상품 목록
//! report products
//!
//! # 2014년 10월 기준으로 리베이스한 Harris 시리즈를 CSV로 저장
//! report rebase -p harris --start 10/2014 -f csv -o harris.csv
//!
//! # VUAA 페이지의 차트 설정 JSON
//! report chart -p vuaa --static
//!
//! # 비교표 CSV 내보내기
//! report export -p vuaa -o output
//!
//! # 상품 선택기 이동 대상
//! report navigate -k harris --from /site/poc_report/produtos/vuaa/vuaa.html
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use report_core::{init_logging, AppConfig, Navigator, ProductCatalog};
use tracing::{debug, info};

mod commands;

use commands::chart::{print_chart, ChartConfig};
use commands::export::export_csv;
use commands::labels::print_labels;
use commands::navigate::run_navigate;
use commands::products::list_products;
use commands::rebase::{run_rebase, RebaseConfig};
use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "report")]
#[command(about = "Product comparison report CLI - 성과 차트 리베이스 및 비교표 도구", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (기본: config/default.toml, 없으면 기본값)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 상품 목록 보기
    Products {
        /// 출력 형식 (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// 날짜 선택기 옵션 보기
    Labels {
        /// 상품 키 (예: harris, vuaa)
        #[arg(short, long)]
        product: String,

        /// 출력 형식 (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// 선택한 시작 날짜 기준으로 리베이스한 시리즈 출력
    Rebase {
        /// 상품 키
        #[arg(short, long)]
        product: String,

        /// 시작 레이블 (MM/YYYY)
        #[arg(short, long)]
        start: Option<String>,

        /// 시작 인덱스 (선택기 옵션 값)
        #[arg(short, long)]
        index: Option<usize>,

        /// 출력 형식 (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 차트 라이브러리 설정 JSON 출력
    Chart {
        /// 상품 키
        #[arg(short, long)]
        product: String,

        /// 시작 레이블 (MM/YYYY)
        #[arg(short, long)]
        start: Option<String>,

        /// 시작 인덱스
        #[arg(short, long)]
        index: Option<usize>,

        /// 정적 차트(섹터, 규모, 비용) 포함
        #[arg(long = "static", default_value = "false")]
        include_static: bool,

        /// 출력 파일 경로
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 비교표 CSV 내보내기
    Export {
        /// 상품 키
        #[arg(short, long)]
        product: String,

        /// 출력 디렉토리 (기본: 설정의 output.directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 상품 선택기 이동 대상 확인
    Navigate {
        /// 선택한 키 (상품 키 또는 inicio)
        #[arg(short, long, default_value = "")]
        key: String,

        /// 현재 페이지 경로
        #[arg(long, default_value = "/")]
        from: String,

        /// 섹션 위치 목록 (id:offset,id:offset)
        #[arg(long)]
        sections: Option<String>,

        /// 스크롤 위치
        #[arg(long, default_value = "0")]
        scroll_y: f64,
    },
}

fn load_config(path: Option<&str>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            AppConfig::load(path).with_context(|| format!("Failed to load config: {}", path))
        }
        None => AppConfig::load_default().context("Failed to load default config"),
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    init_logging(config.logging.to_log_config()).context("Failed to initialize logging")?;
    debug!(?config, "Configuration loaded");

    let catalog = ProductCatalog::from_config(&config).context("Failed to load products")?;

    match cli.command {
        Commands::Products { format } => {
            let count = list_products(&catalog, OutputFormat::parse(&format)?)?;
            info!("Listed {} products", count);
        }

        Commands::Labels { product, format } => {
            let page = catalog.get(&product)?;
            print_labels(page, OutputFormat::parse(&format)?)?;
        }

        Commands::Rebase {
            product,
            start,
            index,
            format,
            output,
        } => {
            let page = catalog.get(&product)?;
            let rebase_config = RebaseConfig {
                start,
                index,
                format: OutputFormat::parse(&format)?,
                output,
            };
            let rows = run_rebase(page, rebase_config)?;
            info!("Rebased {} rows for {}", rows, product);
        }

        Commands::Chart {
            product,
            start,
            index,
            include_static,
            output,
        } => {
            let page = catalog.get(&product)?;
            print_chart(
                page,
                ChartConfig {
                    start,
                    index,
                    include_static,
                    output,
                },
            )?;
        }

        Commands::Export { product, output } => {
            let page = catalog.get(&product)?;
            let dir = output.unwrap_or_else(|| config.output.directory.clone());
            let path = export_csv(page, &dir)?;
            println!("내보내기 완료: {}", path.display());
        }

        Commands::Navigate {
            key,
            from,
            sections,
            scroll_y,
        } => {
            let navigator = Navigator::new(config.navigation.clone());
            run_navigate(&navigator, &key, &from, sections.as_deref(), scroll_y)?;
        }
    }

    Ok(())
}
