use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::{Help, Result};
use std::sync::Arc;

/// 默认使用的数据库schema
pub const DEFAULT_SCHEMA: &str = "public";

/// 默认的连接池最大连接数
pub const DEFAULT_MAX_CONNECTIONS: u32 = 40;

/// 默认的Web服务监听地址
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// 程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// postgresql数据库链接字符串
    pub postgresql_conn_str: String,

    /// 项目/用户表所在的schema，连接建立后会切换到这个schema
    ///
    /// 可通过环境变量 `DATABASE_SCHEMA` 来调整
    pub database_schema: String,

    /// 连接池最大连接数
    ///
    /// 可通过环境变量 `DATABASE_MAX_CONNECTIONS` 来调整
    pub max_connections: u32,

    /// Web服务监听地址
    pub bind_addr: String,
}

impl AppConfig {
    pub fn load() -> Result<Arc<AppConfig>> {
        // 加载.env文件中的数据注入到环境变量中，方便本地测试
        // 线上环境部署时会直接使用环境变量，不需要.env文件
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok(Arc::new(config))
    }

    /// 从任意的键值来源构造配置
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 读取数据库地址信息（仅支持postgresql）
        let db_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("Can not load DATABASE_URL in environment"))
            .suggestion("设置 DATABASE_URL 环境变量")?;

        let schema = lookup("DATABASE_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string());
        if !is_identifier(&schema) {
            return Err(eyre!("Invalid DATABASE_SCHEMA: {schema}"))
                .suggestion("schema名称只能包含字母、数字和下划线，且不能以数字开头");
        }

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(s) => s
                .parse()
                .wrap_err_with(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {s}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(AppConfig {
            postgresql_conn_str: db_url,
            database_schema: schema,
            max_connections,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

/// schema名称会被拼接进 `SET search_path` 语句，只允许普通标识符
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
