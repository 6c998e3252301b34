//! Kansai-dialect rewriting of formal JMA forecast phrases.
//!
//! The transformation is a fixed, ordered list of literal substring
//! replacements. Order matters: an earlier rule may create or consume text a
//! later rule targets, so the list is applied exactly once, top to bottom,
//! never re-scanned. The emoji substitutions are byte-exact and must not be
//! normalized afterwards.

/// Replacement rules, applied in declaration order.
pub const RULES: [(&str, &str); 20] = [
    ("　", " "),
    ("後", "からの"),
    ("一時", "ちょっとのま"),
    ("を伴う", "もある"),
    ("時々", "たま～に"),
    ("を伴い", "もあるし"),
    ("非常に", "めっちゃ"),
    ("激しく", "ぎょーさん"),
    ("山地", "山のほう"),
    ("未明", "夜おそぉに"),
    ("では", "らへんは"),
    ("所により", "どっかでは"),
    ("海上", "海のほう"),
    ("夜遅く", "夜おそぉ"),
    ("夜のはじめ頃", "会社から退社する頃"),
    ("晴れ", "\u{2600}"),
    ("雨", "\u{2614}"),
    ("雪", "\u{26c4}"),
    ("くもり", "\u{2601}"),
    ("雷", "\u{26a1}"),
];

/// Rewrite a formal forecast phrase into the colloquial voice.
#[must_use]
pub fn to_dialect(sentence: &str) -> String {
    RULES
        .iter()
        .fold(sentence.to_string(), |text, (from, to)| text.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("晴れ時々くもり", "☀たま～に☁")]
    #[case("雨", "☔")]
    #[case("雪", "⛄")]
    #[case("雷を伴い", "⚡もあるし")]
    #[case("雷を伴う", "⚡もある")]
    #[case("非常に激しく", "めっちゃぎょーさん")]
    #[case("夜のはじめ頃", "会社から退社する頃")]
    #[case("所により", "どっかでは")]
    fn test_rule_table(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_dialect(input), expected);
    }

    #[test]
    fn test_full_width_space_becomes_ascii() {
        assert_eq!(to_dialect("晴れ　くもり"), "☀ ☁");
    }

    #[test]
    fn test_emoji_are_exact_code_points() {
        // Byte-exact output: U+2600 / U+2601, no variation selectors.
        let out = to_dialect("晴れ時々くもり");
        assert_eq!(out.as_bytes(), "\u{2600}たま～に\u{2601}".as_bytes());
    }

    #[test]
    fn test_rules_apply_in_declared_order_without_rescanning() {
        // 後 is rewritten before 時々, and replacements are not re-scanned,
        // so the ～ produced by たま～に is never touched again.
        assert_eq!(to_dialect("雨後時々雪"), "☔からのたま～に⛄");
    }

    #[test]
    fn test_untouched_text_passes_through() {
        assert_eq!(to_dialect("や。"), "や。");
        assert_eq!(to_dialect("は"), "は");
    }
}
