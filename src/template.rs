use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named slot that may appear in an endpoint path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    User,
    Post,
    Hashtag,
    Stream,
    Subscription,
    Filter,
}

impl Placeholder {
    pub const ALL: [Placeholder; 6] = [
        Placeholder::User,
        Placeholder::Post,
        Placeholder::Hashtag,
        Placeholder::Stream,
        Placeholder::Subscription,
        Placeholder::Filter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Placeholder::User => "User",
            Placeholder::Post => "Post",
            Placeholder::Hashtag => "Hashtag",
            Placeholder::Stream => "Stream",
            Placeholder::Subscription => "Subscription",
            Placeholder::Filter => "Filter",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placeholder {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Placeholder::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| TemplateError::UnknownPlaceholder(s.to_string()))
    }
}

/// Errors raised while compiling or filling a path template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),

    #[error("unclosed placeholder starting at byte {0}")]
    Unclosed(usize),

    #[error("unexpected '}}' at byte {0}")]
    StrayClose(usize),

    #[error("empty placeholder at byte {0}")]
    Empty(usize),

    #[error("operation {operation:?} requires a value for {{{placeholder}}}")]
    MissingArgument {
        operation: String,
        placeholder: Placeholder,
    },
}

/// Values substituted into path templates, one per placeholder.
///
/// Only the fields referenced by the chosen operation need to be set.
/// Values are inserted verbatim and must already be valid path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathArgs {
    pub user: Option<String>,
    pub post: Option<String>,
    pub hashtag: Option<String>,
    pub stream: Option<String>,
    pub subscription: Option<String>,
    pub filter: Option<String>,
}

impl PathArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, id: impl Into<String>) -> Self {
        self.user = Some(id.into());
        self
    }

    pub fn post(mut self, id: impl Into<String>) -> Self {
        self.post = Some(id.into());
        self
    }

    pub fn hashtag(mut self, tag: impl Into<String>) -> Self {
        self.hashtag = Some(tag.into());
        self
    }

    pub fn stream(mut self, id: impl Into<String>) -> Self {
        self.stream = Some(id.into());
        self
    }

    pub fn subscription(mut self, id: impl Into<String>) -> Self {
        self.subscription = Some(id.into());
        self
    }

    pub fn filter(mut self, id: impl Into<String>) -> Self {
        self.filter = Some(id.into());
        self
    }

    /// Get the value bound to a placeholder, if any
    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        let value = match placeholder {
            Placeholder::User => &self.user,
            Placeholder::Post => &self.post,
            Placeholder::Hashtag => &self.hashtag,
            Placeholder::Stream => &self.stream,
            Placeholder::Subscription => &self.subscription,
            Placeholder::Filter => &self.filter,
        };
        value.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Placeholder),
}

/// A path template compiled into literal and placeholder segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Compile a template such as `/stream/0/users/{User}/follow`
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        if c == '{' {
                            return Err(TemplateError::Unclosed(pos));
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(pos));
                    }
                    if name.is_empty() {
                        return Err(TemplateError::Empty(pos));
                    }
                    let placeholder = name.parse()?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(placeholder));
                }
                '}' => return Err(TemplateError::StrayClose(pos)),
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(PathTemplate {
            source: source.to_string(),
            segments,
        })
    }

    /// The template text as registered
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Placeholders referenced by this template, in order of appearance
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot(p) => Some(*p),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute `args` into the template.
    ///
    /// `operation` is only used to label a missing-argument error. Unset and
    /// empty values are both rejected rather than rendered, so an empty id
    /// never turns `/stream/0/users/{User}` into `/stream/0/users/`.
    pub fn render(&self, operation: &str, args: &PathArgs) -> Result<String, TemplateError> {
        let mut path = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Slot(placeholder) => match args.get(*placeholder) {
                    Some(value) if !value.is_empty() => path.push_str(value),
                    _ => {
                        return Err(TemplateError::MissingArgument {
                            operation: operation.to_string(),
                            placeholder: *placeholder,
                        })
                    }
                },
            }
        }
        Ok(path)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
