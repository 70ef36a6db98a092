//! banType 코드 정규화

/// banType이 없을 때 쓰는 표시 문자열
pub const UNKNOWN: &str = "Unknown";

/// 업스트림 banType 코드를 사람이 읽을 수 있는 문자열로 변환.
/// 모르는 코드는 그대로 돌려준다.
pub fn label(code: Option<&str>) -> &str {
    match code {
        Some("Innocent") => "Not banned",
        Some("TemporaryBan") => "Temporarily banned",
        Some("PermanentBan") => "Permanently banned",
        Some(other) => other,
        None => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_fixed_labels() {
        assert_eq!(label(Some("Innocent")), "Not banned");
        assert_eq!(label(Some("TemporaryBan")), "Temporarily banned");
        assert_eq!(label(Some("PermanentBan")), "Permanently banned");
    }

    #[test]
    fn unknown_codes_pass_through() {
        for code in ["Unknown", "ShadowBan", "", "innocent"] {
            assert_eq!(label(Some(code)), code);
        }
    }

    #[test]
    fn missing_code_is_unknown() {
        assert_eq!(label(None), "Unknown");
    }
}
