//! BusinessDay 파싱 속성 테스트

use chrono::NaiveDate;
use krx_core::BusinessDay;
use proptest::prelude::*;

proptest! {
    /// 실제 날짜는 `YYYYMMDD`로 출력한 뒤 다시 파싱해도 같은 값이어야 함
    #[test]
    fn display_then_parse_is_identity(days in 0i64..(365 * 200)) {
        let date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Duration::days(days);
        let day = BusinessDay::new(date);

        let text = day.to_string();
        prop_assert_eq!(text.len(), 8);
        prop_assert_eq!(text.parse::<BusinessDay>().unwrap(), day);
    }

    /// 8자리 숫자가 아닌 입력은 항상 거부되어야 함
    #[test]
    fn non_eight_digit_input_is_rejected(s in "[0-9]{0,7}|[0-9]{9,12}|[0-9]{4}-[0-9]{2}-[0-9]{2}") {
        prop_assert!(s.parse::<BusinessDay>().is_err());
    }

    /// 13월 이상이나 0월은 거부되어야 함
    #[test]
    fn invalid_month_is_rejected(year in 1900u32..2100, month in prop_oneof![Just(0u32), 13u32..100], day in 1u32..29) {
        let s = format!("{:04}{:02}{:02}", year, month, day);
        prop_assert!(s.parse::<BusinessDay>().is_err());
    }
}

#[test]
fn test_calendar_examples() {
    assert!("20230902".parse::<BusinessDay>().is_ok());
    assert!("20230931".parse::<BusinessDay>().is_err());
    assert!("2023-09-02".parse::<BusinessDay>().is_err());
    assert!("20231301".parse::<BusinessDay>().is_err());
}
