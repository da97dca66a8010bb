use anyhow::Result;
use tiku_parser::utils::logging;
use tiku_parser::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：环境变量存在但无法解析时直接报错退出
    let config = Config::try_from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
