//! 服务主入口

use base_api::{config::AppConfig, db, handlers::health, middleware::AppState, routes, telemetry};
use std::io::BufRead;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

enum Command {
    Serve,
    CreateAccount { username: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    let command = match args.get(1).map(String::as_str) {
        None => Command::Serve,
        Some("--version") => {
            println!("base-api {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some("--help") => {
            print_help();
            return Ok(());
        }
        Some("create-account") => match args.get(2) {
            Some(username) => Command::CreateAccount {
                username: username.clone(),
            },
            None => {
                eprintln!("缺少用户名: create-account <username>");
                std::process::exit(1);
            }
        },
        Some(other) => {
            eprintln!("未知参数: {}", other);
            print_help();
            std::process::exit(1);
        }
    };

    // 加载 .env 文件（开发环境）
    // 按优先级加载：.env.local > .env.development > .env
    if let Ok(env) = std::env::var("API_ENV") {
        dotenv::from_filename(format!(".env.{}", env)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    health::set_start_time();

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config);

    tracing::info!(
        app = %config.server.name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting..."
    );

    // 3. 数据库连接池 + 迁移
    let db_pool = db::create_pool(&config.database, config.server.is_debug()).await?;
    db::run_migrations(&db_pool).await?;

    tracing::info!("Database initialized");

    // 4. 构建应用状态
    let app_state = Arc::new(AppState::build(config.clone(), db_pool)?);

    if let Command::CreateAccount { username } = command {
        return create_account(&app_state, &username).await;
    }

    // 5. 构建路由
    let app = routes::create_router(app_state);

    // 6. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. 优雅关闭
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 创建账户，密码从标准输入第一行读取
async fn create_account(state: &AppState, username: &str) -> anyhow::Result<()> {
    let mut password = String::new();
    std::io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);

    if password.len() < 8 {
        anyhow::bail!("password must be at least 8 characters");
    }

    let account = state.account_service.register(username, password).await?;
    println!("created account {} (id {})", account.username, account.id);
    Ok(())
}

/// 优雅关闭信号处理
///
/// 收到信号后开始关闭；超过 `timeout_secs` 仍未完成则强制退出。
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_secs(timeout_secs)).await;
        tracing::warn!("Graceful shutdown timeout reached, forcing exit");
        std::process::exit(1);
    });
}

/// 打印帮助信息
fn print_help() {
    println!("base-api {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: base-api [选项 | 命令]");
    println!();
    println!("选项:");
    println!("  --version                  打印版本信息并退出");
    println!("  --help                     打印此帮助信息并退出");
    println!();
    println!("命令:");
    println!("  create-account <username>  创建账户，密码从标准输入读取");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 API_ 前缀的环境变量完成，例如 API_DATABASE__URL");
}
