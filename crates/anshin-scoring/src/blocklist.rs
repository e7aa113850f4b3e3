//! Filter for menu names too generic to be worth surfacing.
//!
//! Rules, in order:
//! 1. section headers ("menu", "lunch", ...), case-insensitive
//! 2. generic single items (plain rice, miso soup, drinks, condiments, seating)
//! 3. シャリ only as a standalone qualifier, never inside a compound word
//! 4. names ending in ライス that are plain rice, size-qualified rice or a rice set
//!
//! Total and pure: every input gets an answer, empty names are blocked.

const HEADERS: &[&str] = &[
    "メニュー",
    "menu",
    "おすすめ",
    "オススメ",
    "recommended",
    "ランチ",
    "lunch",
    "ディナー",
    "dinner",
    "セット",
    "単品",
    "トッピング",
    "ドリンクメニュー",
    "グランドメニュー",
    "限定メニュー",
    "本日のおすすめ",
];

const GENERIC_ITEMS: &[&str] = &[
    "ライス",
    "ご飯",
    "ごはん",
    "白米",
    "白ごはん",
    "味噌汁",
    "みそ汁",
    "お味噌汁",
    "ドリンク",
    "ソフトドリンク",
    "お茶",
    "水",
    "お水",
    "お冷",
    "醤油",
    "ソース",
    "塩",
    "ケチャップ",
    "マヨネーズ",
    "ドレッシング",
    "漬物",
    "お漬物",
    "大盛り",
    "お子様椅子",
    "キッズチェア",
    "チャイルドシート",
    "取り皿",
    "席料",
    "チャージ",
];

const SUSHI_RICE: &str = "シャリ";
const RICE_SUFFIX: &str = "ライス";

/// Size or side qualifiers that may precede ライス without making a dish.
const RICE_QUALIFIERS: &[&str] = &[
    "大盛り", "大盛", "おかわり", "サイド", "ミニ", "追加", "小", "中", "大", "並", "半", "白",
];

const OPEN_BRACKETS: &[char] = &['(', '（', '[', '【', '「', '『'];
const CLOSE_BRACKETS: &[char] = &[')', '）', ']', '】', '」', '』'];
const SIZE_MARKS: &[char] = &['小', '大', '少', '多', '半', '抜'];

/// Whether a menu name is too generic to keep.
pub fn is_blocked(name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return true;
    }
    let lower = trimmed.to_lowercase();
    if HEADERS.iter().any(|h| h.to_lowercase() == lower) {
        return true;
    }
    if GENERIC_ITEMS.contains(&trimmed) {
        return true;
    }
    has_standalone_sushi_rice(trimmed) || is_generic_rice(trimmed)
}

fn is_boundary_before(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => c.is_whitespace() || OPEN_BRACKETS.contains(&c) || CLOSE_BRACKETS.contains(&c),
    }
}

fn is_boundary_after(rest: &str) -> bool {
    match rest.chars().next() {
        None => true,
        Some(c) => {
            c.is_whitespace()
                || OPEN_BRACKETS.contains(&c)
                || CLOSE_BRACKETS.contains(&c)
                || SIZE_MARKS.contains(&c)
                || rest.starts_with("なし")
        }
    }
}

fn has_standalone_sushi_rice(name: &str) -> bool {
    name.match_indices(SUSHI_RICE).any(|(idx, m)| {
        let before = name[..idx].chars().next_back();
        let after = &name[idx + m.len()..];
        is_boundary_before(before) && is_boundary_after(after)
    })
}

/// Drop trailing bracketed qualifiers: "ライス（小）" → "ライス".
fn strip_trailing_qualifiers(name: &str) -> &str {
    let mut current = name.trim_end();
    loop {
        let Some(last) = current.chars().next_back() else {
            return current;
        };
        if !CLOSE_BRACKETS.contains(&last) {
            return current;
        }
        match current.rfind(OPEN_BRACKETS) {
            Some(open) => current = current[..open].trim_end(),
            None => return current,
        }
    }
}

fn only_qualifiers(mut prefix: &str) -> bool {
    while !prefix.is_empty() {
        match RICE_QUALIFIERS.iter().find(|q| prefix.starts_with(**q)) {
            Some(q) => prefix = prefix[q.len()..].trim_start(),
            None => return false,
        }
    }
    true
}

fn is_generic_rice(name: &str) -> bool {
    if ["ライスセット", "ライス単品", "ライス(単品)", "ライス（単品）"]
        .iter()
        .any(|p| name.contains(p))
    {
        return true;
    }
    let core = strip_trailing_qualifiers(name);
    match core.strip_suffix(RICE_SUFFIX) {
        Some(prefix) => only_qualifiers(prefix.trim()),
        None => false,
    }
}

/// Words that only show up in scraped page chrome.
const SCRAPE_NOISE: &[&str] = &[
    "logo",
    "icon",
    "button",
    "banner",
    "copyright",
    "©",
    "javascript",
    "クリック",
    "詳細",
    "ページ",
    "ログイン",
    "もっと見る",
    "一覧へ",
    "戻る",
    "お問い合わせ",
    "行っておりません",
    "致しかねます",
];

const MAX_MENU_NAME_CHARS: usize = 60;

/// Whether scraped text is page chrome rather than a menu name.
pub fn is_scrape_noise(text: &str) -> bool {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    if len < 2 || len > MAX_MENU_NAME_CHARS {
        return true;
    }
    let lower = trimmed.to_lowercase();
    SCRAPE_NOISE.iter().any(|w| lower.contains(w))
}
