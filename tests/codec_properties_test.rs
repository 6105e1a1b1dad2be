use form_ref::{
    is_valid, FormCategory, FormReferenceCodec, FormReferenceNumber, NumberSource, SeededSource,
};
use std::sync::Mutex;

/// 回傳固定序列，用來檢查確切輸出
struct FixedSequence(Mutex<Vec<u32>>);

impl NumberSource for FixedSequence {
    fn draw(&self, low: u32, high: u32) -> u32 {
        let mut values = self.0.lock().unwrap();
        let value = values.remove(0);
        assert!(value >= low && value <= high);
        value
    }
}

#[test]
fn test_bare_numbers_cover_range_bounds() {
    let codec = FormReferenceCodec::with_source(FixedSequence(Mutex::new(vec![100_000, 999_999])));
    assert_eq!(codec.generate_bare_number(), "100000");
    assert_eq!(codec.generate_bare_number(), "999999");
}

#[test]
fn test_random_numbers_have_six_digits_and_no_leading_zero() {
    let codec = FormReferenceCodec::new();
    for _ in 0..5000 {
        let number = codec.generate_bare_number();
        assert_eq!(number.len(), 6);
        assert!(number.bytes().all(|b| b.is_ascii_digit()));
        assert_ne!(number.as_bytes()[0], b'0');
    }
}

#[test]
fn test_prefixed_number_is_prefix_hyphen_bare() {
    let codec = FormReferenceCodec::with_source(SeededSource::new(11));
    for category in FormCategory::ALL {
        let number = codec.generate_prefixed_number(category.code());
        let expected_head = format!("{}-", category.code());
        assert!(number.starts_with(&expected_head));
        assert!(is_valid(&number[expected_head.len()..]));
        assert!(codec.is_valid(&number));
    }
}

#[test]
fn test_listed_invalid_candidates() {
    let codec = FormReferenceCodec::new();
    assert!(codec.is_valid("SF-123456"));
    for candidate in ["", "12345", "1234567", "SF-12AB56", "SF-123456-extra"] {
        assert!(!codec.is_valid(candidate), "{:?} should be invalid", candidate);
    }
}

#[test]
fn test_codec_shared_across_threads() {
    let codec = FormReferenceCodec::new();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..500 {
                    assert!(codec.is_valid(&codec.generate_prefixed_number("DY")));
                }
            });
        }
    });
}

#[test]
fn test_generated_values_parse_into_form_reference_number() {
    let codec = FormReferenceCodec::with_source(SeededSource::new(3));
    let number: FormReferenceNumber = codec.generate_prefixed_number("CL").parse().unwrap();
    assert_eq!(number.prefix(), Some("CL"));
    assert_eq!(number.digits().len(), 6);

    let checked = codec.generate_for_category(FormCategory::Safety).unwrap();
    assert_eq!(checked.prefix(), Some("SF"));
}

#[test]
fn test_distinct_batch_has_no_duplicates() {
    let codec = FormReferenceCodec::with_source(SeededSource::new(99));
    let batch = codec.generate_distinct_batch(Some("LB"), 2000).unwrap();
    let unique: std::collections::HashSet<_> = batch.iter().collect();
    assert_eq!(unique.len(), 2000);
    assert!(batch.iter().all(|n| is_valid(n)));
}
