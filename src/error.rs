use thiserror::Error;

/// 表示文字列はそのまま利用者向けの診断メッセージになる
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Lỗi đọc file: {path} ({source})")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File không hợp lệ. Vui lòng chọn file .xlsx: {0}")]
    InvalidFileType(String),

    #[error("Lỗi xử lý file Excel: {0}")]
    ExcelRead(String),

    #[error("Không tìm thấy cột 'MST' hoặc file trống.")]
    MissingColumn,

    #[error("Lỗi mạng: {0}")]
    Network(String),

    #[error("Lỗi khi xuất Excel: {0}")]
    Export(String),

    #[error("Lỗi cấu hình: {0}")]
    Config(String),

    #[error("Lỗi JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Lỗi IO: {0}")]
    Io(#[from] std::io::Error),
}

impl LookupError {
    /// ファイル単位（実行前に打ち切る）のエラーか
    pub fn is_file_level(&self) -> bool {
        matches!(
            self,
            LookupError::FileRead { .. }
                | LookupError::InvalidFileType(_)
                | LookupError::ExcelRead(_)
                | LookupError::MissingColumn
        )
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
