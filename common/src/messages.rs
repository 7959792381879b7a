//! 利用者向けステータスメッセージ（ベトナム語）

pub const INITIAL: &str = "Vui lòng chọn một file Excel để bắt đầu.";
pub const READING: &str = "🔄 Đang đọc file Excel...";

pub const EMPTY_TAX_CODE: &str = "(trống)";
pub const NO_TAX_CODE: &str = "Không có MST";
pub const SKIPPED_STATUS: &str = "❌ Bỏ qua";
pub const NOT_FOUND_NAME: &str = "Không tìm thấy";
pub const FAILURE_NAME: &str = "Lỗi";
pub const UNKNOWN_ERROR: &str = "Lỗi không xác định";

pub const NOTHING_TO_EXPORT: &str = "ℹ️ Không có dữ liệu để xuất.";
pub const EXPORTING: &str = "📤 Đang tạo file Excel...";

/// 照会中の表示（index は0始まり）
pub fn looking_up(index: usize, total: usize, tax_code: &str) -> String {
    let shown = if tax_code.is_empty() { EMPTY_TAX_CODE } else { tax_code };
    format!("🔎 [{}/{}] Tra cứu MST: {}...", index + 1, total, shown)
}

pub fn rejected_status(desc: Option<&str>) -> String {
    let desc = desc.filter(|d| !d.is_empty()).unwrap_or(UNKNOWN_ERROR);
    format!("❌ {}", desc)
}

pub fn network_failure_status(cause: &str) -> String {
    format!("❌ Lỗi mạng: {}", cause)
}

/// sheet_row はヘッダ行を含むシート上の行番号
pub fn halted_missing_tax_code(sheet_row: usize) -> String {
    format!("⚠️ Đã dừng do dòng {} không có MST.", sheet_row)
}

pub fn halted_on_error(tax_code: &str) -> String {
    format!("⚠️ Đã dừng do lỗi ở MST: {}.", tax_code)
}

pub fn completed(success: usize, error: usize) -> String {
    format!("✅ Hoàn thành: {} thành công, {} lỗi.", success, error)
}

/// ファイル単位の失敗
pub fn failure(cause: &impl std::fmt::Display) -> String {
    format!("❌ {}", cause)
}

pub fn exported(path: &str) -> String {
    format!("✅ File Excel đã được lưu: {}", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looking_up_empty_code() {
        assert_eq!(looking_up(0, 3, ""), "🔎 [1/3] Tra cứu MST: (trống)...");
    }

    #[test]
    fn test_rejected_status_default() {
        assert_eq!(rejected_status(None), "❌ Lỗi không xác định");
        assert_eq!(rejected_status(Some("")), "❌ Lỗi không xác định");
        assert_eq!(rejected_status(Some("Invalid tax code")), "❌ Invalid tax code");
    }

    #[test]
    fn test_completed() {
        assert_eq!(completed(2, 0), "✅ Hoàn thành: 2 thành công, 0 lỗi.");
    }
}
