//! Pluggable recognizers for the number, boolean and null literals.

use std::fmt::Debug;

/// Recognizes a literal at a given position of the source text.
///
/// A matcher reports "no match" by returning [`None`]; it never fails. On a match it returns the
/// byte index one past the end of the literal, which must be greater than `index` and lie on a
/// character boundary.
pub trait LiteralMatcher: Debug + Send + Sync {
    /// Tries to match a literal starting at the byte index `index` of `source`.
    fn try_match(&self, source: &str, index: usize) -> Option<usize>;
}

/// A matcher that never matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoMatch;

impl LiteralMatcher for NoMatch {
    fn try_match(&self, _source: &str, _index: usize) -> Option<usize> {
        None
    }
}

/// Matches any word of a fixed set that is not directly followed by another word character.
///
/// Words are tried longest first, so with the words `nil` and `nill` the input `nill` matches
/// the longer one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordMatcher {
    words: Vec<String>,
}

impl WordMatcher {
    /// Creates a matcher for the given words. Empty words are ignored.
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = words
            .into_iter()
            .map(Into::into)
            .filter(|word: &String| !word.is_empty())
            .collect::<Vec<_>>();
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words.dedup();

        Self { words }
    }

    /// Returns the words of the matcher, longest first.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

fn is_word_character(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_'
}

impl LiteralMatcher for WordMatcher {
    fn try_match(&self, source: &str, index: usize) -> Option<usize> {
        let rest = source.get(index..)?;

        self.words.iter().find_map(|word| {
            let after = rest.strip_prefix(word.as_str())?;
            let at_boundary = after.chars().next().map_or(true, |c| !is_word_character(c));

            at_boundary.then_some(index + word.len())
        })
    }
}

/// Adapts a closure into a [`LiteralMatcher`].
///
/// ```
/// use ren::lexical::matcher::{FnMatcher, LiteralMatcher};
///
/// let digits = FnMatcher::new(|source: &str, index: usize| {
///     let len = source[index..].bytes().take_while(u8::is_ascii_digit).count();
///     (len > 0).then_some(index + len)
/// });
///
/// assert_eq!(digits.try_match("(42)", 1), Some(3));
/// assert_eq!(digits.try_match("(42)", 0), None);
/// ```
#[derive(Clone, Copy)]
pub struct FnMatcher<F> {
    matcher: F,
}

impl<F> FnMatcher<F>
where
    F: Fn(&str, usize) -> Option<usize> + Send + Sync,
{
    /// Wraps the closure.
    pub fn new(matcher: F) -> Self {
        Self { matcher }
    }
}

impl<F> Debug for FnMatcher<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMatcher").finish_non_exhaustive()
    }
}

impl<F> LiteralMatcher for FnMatcher<F>
where
    F: Fn(&str, usize) -> Option<usize> + Send + Sync,
{
    fn try_match(&self, source: &str, index: usize) -> Option<usize> {
        (self.matcher)(source, index)
    }
}
