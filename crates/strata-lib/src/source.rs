use std::borrow::Cow;

/// Random-access document text.
///
/// Positions are byte offsets. `slice` may be asked for text past a parse
/// region, which the engine uses as lookahead.
pub trait TextSource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text in `from..to`, clamped to the document.
    fn slice(&self, from: usize, to: usize) -> Cow<'_, str>;
}

impl TextSource for str {
    fn len(&self) -> usize {
        str::len(self)
    }

    fn slice(&self, from: usize, to: usize) -> Cow<'_, str> {
        let to = to.min(str::len(self));
        Cow::Borrowed(self.get(from.min(to)..to).unwrap_or_default())
    }
}

impl TextSource for String {
    fn len(&self) -> usize {
        self.as_str().len()
    }

    fn slice(&self, from: usize, to: usize) -> Cow<'_, str> {
        TextSource::slice(self.as_str(), from, to)
    }
}
