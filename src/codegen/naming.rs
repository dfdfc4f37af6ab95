use std::{borrow::Cow, collections::BTreeSet};

pub const COMMON_INITIALISMS: &[&str] = &[
    "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP",
    "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SSH", "TLS", "TTL", "UI", "UID",
    "UUID", "URI", "URL", "UTF8", "VM", "XML",
];

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Closed set of words that are emitted fully uppercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initialisms {
    words: BTreeSet<String>,
}

impl Initialisms {
    pub fn empty() -> Self {
        Self {
            words: BTreeSet::new(),
        }
    }

    pub fn with<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                self.words.insert(word.to_uppercase());
            }
        }
        self
    }

    /// `word` is compared as given; callers pass the uppercased form.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True when `word` splits into initialisms and single characters with at
    /// least one initialism among them, e.g. `AID` is `A` + `ID`.
    fn covers(&self, word: &str) -> bool {
        self.covers_rest(word, false)
    }

    fn covers_rest(&self, rest: &str, found: bool) -> bool {
        if rest.is_empty() {
            return found;
        }
        (1..=rest.len()).rev().any(|len| {
            if !rest.is_char_boundary(len) {
                return false;
            }
            let (head, tail) = rest.split_at(len);
            let initialism = self.contains(head);
            (initialism || head.chars().count() == 1) && self.covers_rest(tail, found || initialism)
        })
    }
}

impl Default for Initialisms {
    fn default() -> Self {
        Self::empty().with(COMMON_INITIALISMS)
    }
}

/// Turns raw column and table names into exported Go identifiers.
///
/// Output is a fixed point: normalizing an identifier this type produced
/// returns it unchanged.
#[derive(Debug, Clone, Default)]
pub struct IdentifierNormalizer {
    initialisms: Initialisms,
}

impl IdentifierNormalizer {
    pub fn new(initialisms: Initialisms) -> Self {
        Self { initialisms }
    }

    pub fn initialisms(&self) -> &Initialisms {
        &self.initialisms
    }

    /// Normalizes `raw` into an identifier, e.g. `foo_id` becomes `FooID`.
    ///
    /// Names without a single letter or digit collapse to one `_` per input
    /// character; such identifiers are not rejected.
    pub fn normalize(&self, raw: &str) -> String {
        let mut words = split_words(&fold_shouted(raw));
        if words.is_empty() {
            return "_".repeat(raw.chars().count());
        }
        spell_leading_digit(&mut words);
        self.merge_split_initialisms(&mut words);
        self.merge_bare_letters(&mut words);

        let joined: String = words.iter().map(|word| self.case_word(word)).collect();
        sanitize(&joined)
    }

    // `utf8` splits at the letter/digit boundary; glue the halves back when
    // together they form a known initialism.
    fn merge_split_initialisms(&self, words: &mut Vec<String>) {
        let mut i = 0;
        while i + 1 < words.len() {
            let candidate = format!("{}{}", words[i], words[i + 1]).to_uppercase();
            if self.initialisms.contains(&candidate) {
                let next = words.remove(i + 1);
                words[i].push_str(&next);
            } else {
                i += 1;
            }
        }
    }

    // Two capitals with no initialism between them would read back as one
    // shouted word (`x_y` -> `XY` -> `Xy`), so such neighbours are cased as
    // one word up front.
    fn merge_bare_letters(&self, words: &mut Vec<String>) {
        let mut i = 0;
        while i + 1 < words.len() {
            let ends_bare = words[i].chars().next_back().is_some_and(char::is_alphabetic)
                && self.is_bare(&words[i]);
            let starts_bare = words[i + 1].chars().next().is_some_and(char::is_alphabetic)
                && self.is_bare(&words[i + 1]);
            if ends_bare && starts_bare {
                let next = words.remove(i + 1);
                words[i].push_str(&next);
            } else {
                i += 1;
            }
        }
    }

    /// A word that cases to capitals and digits without any initialism, like
    /// `A` or `V2`.
    fn is_bare(&self, word: &str) -> bool {
        let cased = self.case_word(word);
        !cased.chars().any(is_lower_like) && !self.initialisms.covers(&cased)
    }

    fn case_word(&self, word: &str) -> String {
        let upper = word.to_uppercase();
        if self.initialisms.contains(&upper) {
            return upper;
        }
        if !word.chars().any(is_lower_like) && self.initialisms.covers(word) {
            return word.to_string();
        }
        title_case(word)
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_ascii_digit()
}

// Caseless letters count as lowercase so they never extend a capital run.
fn is_lower_like(ch: char) -> bool {
    ch.is_alphabetic() && !ch.is_uppercase()
}

// `USER_ID` is read as `user_id`. Names without separators are left alone,
// which keeps generated identifiers like `AID` intact on a second pass.
fn fold_shouted(raw: &str) -> Cow<'_, str> {
    let shouted = raw.chars().any(char::is_uppercase)
        && !raw.chars().any(is_lower_like)
        && raw.chars().any(|ch| !is_word_char(ch));
    if shouted {
        Cow::Owned(raw.to_lowercase())
    } else {
        Cow::Borrowed(raw)
    }
}

/// Splits on separators, lower->upper, lower->digit and digit->letter
/// transitions, and before the last capital of a run followed by lowercase
/// (`HTTPServer`). Capitals keep trailing digits (`V2`, `UTF8`).
fn split_words(raw: &str) -> Vec<String> {
    let chars: Vec<char> = raw.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !is_word_char(ch) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|&next| is_lower_like(next));
            let boundary = (is_lower_like(prev) && (ch.is_uppercase() || ch.is_ascii_digit()))
                || (prev.is_ascii_digit() && ch.is_alphabetic())
                || (prev.is_uppercase() && ch.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn spell_leading_digit(words: &mut Vec<String>) {
    let Some(first) = words.first() else {
        return;
    };
    let Some(digit) = first.chars().next().and_then(|ch| ch.to_digit(10)) else {
        return;
    };
    let rest = first[1..].to_string();
    words[0] = DIGIT_WORDS[digit as usize].to_string();
    if !rest.is_empty() {
        words.insert(1, rest);
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    let mut out = String::with_capacity(word.len());
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        for ch in chars {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

fn sanitize(name: &str) -> String {
    name.chars()
        .enumerate()
        .map(|(i, ch)| {
            let ok = if i == 0 {
                ch.is_alphabetic()
            } else {
                ch.is_alphanumeric()
            };
            if ok { ch } else { '_' }
        })
        .collect()
}
