//! The gojūon kana catalog.
//!
//! A fixed, ordered table of the 104 kana taught by the trainer. Each entry
//! carries both syllabary glyphs, the romaji reading, a class tag and the
//! gojūon row it belongs to. The catalog is immutable; learning state lives
//! in [`crate::types::ReviewCard`] keyed by `kana_id`.

use serde::{Deserialize, Serialize};

/// Kana classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KanaClass {
    /// Unvoiced base syllables (あ〜ん).
    Seion,
    /// Voiced syllables (が〜ぼ).
    Dakuon,
    /// Semi-voiced syllables (ぱ行).
    Handakuon,
    /// Contracted syllables (きゃ, しゅ, ...).
    Yoon,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kana {
    pub id: &'static str,
    pub hiragana: &'static str,
    pub katakana: &'static str,
    pub romaji: &'static str,
    pub class: KanaClass,
    pub row: &'static str,
}

/// Which slice of the catalog a study session draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KanaScope {
    /// Every kana in the catalog.
    #[default]
    All,
    /// Basic unvoiced syllables only.
    Seion,
}

impl KanaScope {
    pub fn contains(self, kana: &Kana) -> bool {
        match self {
            Self::All => true,
            Self::Seion => kana.class == KanaClass::Seion,
        }
    }

    /// Scope check by catalog id. Unknown ids are never in scope.
    pub fn contains_id(self, kana_id: &str) -> bool {
        find(kana_id).is_some_and(|kana| self.contains(kana))
    }
}

/// The full catalog in canonical gojūon order.
pub fn all() -> &'static [Kana] {
    KANA
}

/// Look up a kana by its stable id.
pub fn find(id: &str) -> Option<&'static Kana> {
    KANA.iter().find(|kana| kana.id == id)
}

const fn k(
    id: &'static str,
    hiragana: &'static str,
    katakana: &'static str,
    romaji: &'static str,
    class: KanaClass,
    row: &'static str,
) -> Kana {
    Kana {
        id,
        hiragana,
        katakana,
        romaji,
        class,
        row,
    }
}

use KanaClass::{Dakuon, Handakuon, Seion, Yoon};

#[rustfmt::skip]
const KANA: &[Kana] = &[
    // a-row
    k("a", "あ", "ア", "a", Seion, "a"),
    k("i", "い", "イ", "i", Seion, "a"),
    k("u", "う", "ウ", "u", Seion, "a"),
    k("e", "え", "エ", "e", Seion, "a"),
    k("o", "お", "オ", "o", Seion, "a"),
    // ka-row
    k("ka", "か", "カ", "ka", Seion, "ka"),
    k("ki", "き", "キ", "ki", Seion, "ka"),
    k("ku", "く", "ク", "ku", Seion, "ka"),
    k("ke", "け", "ケ", "ke", Seion, "ka"),
    k("ko", "こ", "コ", "ko", Seion, "ka"),
    // sa-row
    k("sa", "さ", "サ", "sa", Seion, "sa"),
    k("shi", "し", "シ", "shi", Seion, "sa"),
    k("su", "す", "ス", "su", Seion, "sa"),
    k("se", "せ", "セ", "se", Seion, "sa"),
    k("so", "そ", "ソ", "so", Seion, "sa"),
    // ta-row
    k("ta", "た", "タ", "ta", Seion, "ta"),
    k("chi", "ち", "チ", "chi", Seion, "ta"),
    k("tsu", "つ", "ツ", "tsu", Seion, "ta"),
    k("te", "て", "テ", "te", Seion, "ta"),
    k("to", "と", "ト", "to", Seion, "ta"),
    // na-row
    k("na", "な", "ナ", "na", Seion, "na"),
    k("ni", "に", "ニ", "ni", Seion, "na"),
    k("nu", "ぬ", "ヌ", "nu", Seion, "na"),
    k("ne", "ね", "ネ", "ne", Seion, "na"),
    k("no", "の", "ノ", "no", Seion, "na"),
    // ha-row
    k("ha", "は", "ハ", "ha", Seion, "ha"),
    k("hi", "ひ", "ヒ", "hi", Seion, "ha"),
    k("fu", "ふ", "フ", "fu", Seion, "ha"),
    k("he", "へ", "ヘ", "he", Seion, "ha"),
    k("ho", "ほ", "ホ", "ho", Seion, "ha"),
    // ma-row
    k("ma", "ま", "マ", "ma", Seion, "ma"),
    k("mi", "み", "ミ", "mi", Seion, "ma"),
    k("mu", "む", "ム", "mu", Seion, "ma"),
    k("me", "め", "メ", "me", Seion, "ma"),
    k("mo", "も", "モ", "mo", Seion, "ma"),
    // ya-row
    k("ya", "や", "ヤ", "ya", Seion, "ya"),
    k("yu", "ゆ", "ユ", "yu", Seion, "ya"),
    k("yo", "よ", "ヨ", "yo", Seion, "ya"),
    // ra-row
    k("ra", "ら", "ラ", "ra", Seion, "ra"),
    k("ri", "り", "リ", "ri", Seion, "ra"),
    k("ru", "る", "ル", "ru", Seion, "ra"),
    k("re", "れ", "レ", "re", Seion, "ra"),
    k("ro", "ろ", "ロ", "ro", Seion, "ra"),
    // wa-row
    k("wa", "わ", "ワ", "wa", Seion, "wa"),
    k("wo", "を", "ヲ", "wo", Seion, "wa"),
    k("n", "ん", "ン", "n", Seion, "wa"),
    // dakuon
    k("ga", "が", "ガ", "ga", Dakuon, "ga"),
    k("gi", "ぎ", "ギ", "gi", Dakuon, "ga"),
    k("gu", "ぐ", "グ", "gu", Dakuon, "ga"),
    k("ge", "げ", "ゲ", "ge", Dakuon, "ga"),
    k("go", "ご", "ゴ", "go", Dakuon, "ga"),
    k("za", "ざ", "ザ", "za", Dakuon, "za"),
    k("ji", "じ", "ジ", "ji", Dakuon, "za"),
    k("zu", "ず", "ズ", "zu", Dakuon, "za"),
    k("ze", "ぜ", "ゼ", "ze", Dakuon, "za"),
    k("zo", "ぞ", "ゾ", "zo", Dakuon, "za"),
    k("da", "だ", "ダ", "da", Dakuon, "da"),
    k("dji", "ぢ", "ヂ", "dji", Dakuon, "da"),
    k("dzu", "づ", "ヅ", "dzu", Dakuon, "da"),
    k("de", "で", "デ", "de", Dakuon, "da"),
    k("do", "ど", "ド", "do", Dakuon, "da"),
    k("ba", "ば", "バ", "ba", Dakuon, "ba"),
    k("bi", "び", "ビ", "bi", Dakuon, "ba"),
    k("bu", "ぶ", "ブ", "bu", Dakuon, "ba"),
    k("be", "べ", "ベ", "be", Dakuon, "ba"),
    k("bo", "ぼ", "ボ", "bo", Dakuon, "ba"),
    // handakuon
    k("pa", "ぱ", "パ", "pa", Handakuon, "pa"),
    k("pi", "ぴ", "ピ", "pi", Handakuon, "pa"),
    k("pu", "ぷ", "プ", "pu", Handakuon, "pa"),
    k("pe", "ぺ", "ペ", "pe", Handakuon, "pa"),
    k("po", "ぽ", "ポ", "po", Handakuon, "pa"),
    // yoon
    k("kya", "きゃ", "キャ", "kya", Yoon, "kya"),
    k("kyu", "きゅ", "キュ", "kyu", Yoon, "kya"),
    k("kyo", "きょ", "キョ", "kyo", Yoon, "kya"),
    k("sha", "しゃ", "シャ", "sha", Yoon, "sha"),
    k("shu", "しゅ", "シュ", "shu", Yoon, "sha"),
    k("sho", "しょ", "ショ", "sho", Yoon, "sha"),
    k("cha", "ちゃ", "チャ", "cha", Yoon, "cha"),
    k("chu", "ちゅ", "チュ", "chu", Yoon, "cha"),
    k("cho", "ちょ", "チョ", "cho", Yoon, "cha"),
    k("nya", "にゃ", "ニャ", "nya", Yoon, "nya"),
    k("nyu", "にゅ", "ニュ", "nyu", Yoon, "nya"),
    k("nyo", "にょ", "ニョ", "nyo", Yoon, "nya"),
    k("hya", "ひゃ", "ヒャ", "hya", Yoon, "hya"),
    k("hyu", "ひゅ", "ヒュ", "hyu", Yoon, "hya"),
    k("hyo", "ひょ", "ヒョ", "hyo", Yoon, "hya"),
    k("mya", "みゃ", "ミャ", "mya", Yoon, "mya"),
    k("myu", "みゅ", "ミュ", "myu", Yoon, "mya"),
    k("myo", "みょ", "ミョ", "myo", Yoon, "mya"),
    k("rya", "りゃ", "リャ", "rya", Yoon, "rya"),
    k("ryu", "りゅ", "リュ", "ryu", Yoon, "rya"),
    k("ryo", "りょ", "リョ", "ryo", Yoon, "rya"),
    k("gya", "ぎゃ", "ギャ", "gya", Yoon, "gya"),
    k("gyu", "ぎゅ", "ギュ", "gyu", Yoon, "gya"),
    k("gyo", "ぎょ", "ギョ", "gyo", Yoon, "gya"),
    k("ja", "じゃ", "ジャ", "ja", Yoon, "ja"),
    k("ju", "じゅ", "ジュ", "ju", Yoon, "ja"),
    k("jo", "じょ", "ジョ", "jo", Yoon, "ja"),
    k("bya", "びゃ", "ビャ", "bya", Yoon, "bya"),
    k("byu", "びゅ", "ビュ", "byu", Yoon, "bya"),
    k("byo", "びょ", "ビョ", "byo", Yoon, "bya"),
    k("pya", "ぴゃ", "ピャ", "pya", Yoon, "pya"),
    k("pyu", "ぴゅ", "ピュ", "pyu", Yoon, "pya"),
    k("pyo", "ぴょ", "ピョ", "pyo", Yoon, "pya"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_104_entries() {
        assert_eq!(all().len(), 104);
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<&str> = all().iter().map(|kana| kana.id).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(find("shi").map(|kana| kana.hiragana), Some("し"));
        assert!(find("xx").is_none());
    }

    #[test]
    fn seion_scope_excludes_voiced_rows() {
        assert!(KanaScope::Seion.contains_id("ka"));
        assert!(!KanaScope::Seion.contains_id("ga"));
        assert!(!KanaScope::Seion.contains_id("kya"));
        assert!(KanaScope::All.contains_id("kya"));
    }

    #[test]
    fn unknown_id_is_out_of_scope() {
        assert!(!KanaScope::All.contains_id("missing"));
    }

    #[test]
    fn seion_count_matches_base_syllabary() {
        let count = all()
            .iter()
            .filter(|kana| kana.class == KanaClass::Seion)
            .count();
        assert_eq!(count, 46);
    }
}
