//! エラー表示テスト
//!
//! 表示文字列がそのまま利用者向けメッセージになることを確認

use mst_lookup::error::LookupError;
use mst_lookup_common::messages;

#[test]
fn test_missing_column_message() {
    let err = LookupError::MissingColumn;
    assert_eq!(messages::failure(&err), "❌ Không tìm thấy cột 'MST' hoặc file trống.");
}

#[test]
fn test_error_display() {
    let cases = vec![
        (
            LookupError::InvalidFileType("ds.csv".to_string()),
            "File không hợp lệ. Vui lòng chọn file .xlsx: ds.csv",
        ),
        (
            LookupError::ExcelRead("zip error".to_string()),
            "Lỗi xử lý file Excel: zip error",
        ),
        (LookupError::Network("timeout".to_string()), "Lỗi mạng: timeout"),
        (
            LookupError::Export("disk full".to_string()),
            "Lỗi khi xuất Excel: disk full",
        ),
        (LookupError::Config("URL".to_string()), "Lỗi cấu hình: URL"),
    ];

    for (err, expected) in cases {
        assert_eq!(format!("{}", err), expected);
    }
}

#[test]
fn test_file_read_display() {
    let err = LookupError::FileRead {
        path: "ds.xlsx".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    };
    assert_eq!(format!("{}", err), "Lỗi đọc file: ds.xlsx (not found)");
    assert_eq!(messages::failure(&err), "❌ Lỗi đọc file: ds.xlsx (not found)");
}

#[test]
fn test_file_level_classification() {
    assert!(LookupError::MissingColumn.is_file_level());
    assert!(LookupError::ExcelRead("x".into()).is_file_level());
    assert!(LookupError::InvalidFileType("x".into()).is_file_level());
    assert!(!LookupError::Network("x".into()).is_file_level());
    assert!(!LookupError::Export("x".into()).is_file_level());
}

#[test]
fn test_io_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
    let err: LookupError = io_error.into();
    assert!(matches!(err, LookupError::Io(_)));
    assert!(format!("{}", err).contains("access denied"));
}
