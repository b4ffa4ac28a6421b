//! 启动/运行期错误 (请求级错误使用 [`AppError`](crate::utils::AppError))

use thiserror::Error;

use crate::utils::AppError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    App(#[from] AppError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
