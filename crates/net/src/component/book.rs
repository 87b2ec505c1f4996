//! Book and quill contents.

use crate::types::{self, NetworkType};
use mdminecraft_core::tag::{self, CompoundBuilder, TagSerializer};
use mdminecraft_core::{CodecError, Tag, Text};

/// Most pages a book may hold.
pub const MAX_PAGES: usize = 100;

/// Text with an optional chat-filtered variant.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredText<T> {
    /// Original text.
    pub raw: T,
    /// Filtered replacement shown to players with filtering enabled.
    pub filtered: Option<T>,
}

impl<T> FilteredText<T> {
    /// Unfiltered text.
    pub fn plain(raw: T) -> Self {
        Self { raw, filtered: None }
    }
}

impl<T: Clone + Send + Sync + 'static> FilteredText<T> {
    /// Binary codec: the raw value then an optional filtered value.
    pub fn network_type(inner: NetworkType<T>) -> NetworkType<Self> {
        let filtered = inner.clone().optional();
        let (inner_out, filtered_out) = (inner.clone(), filtered.clone());
        NetworkType::new(
            move |buf| {
                Ok(FilteredText {
                    raw: inner.read(buf)?,
                    filtered: filtered.read(buf)?,
                })
            },
            move |buf, text: &FilteredText<T>| {
                inner_out.write(buf, &text.raw)?;
                filtered_out.write(buf, &text.filtered)
            },
        )
    }

    /// Tag codec: `{raw, filtered}`, or a bare value taken as `raw`.
    pub fn tag_serializer(inner: TagSerializer<T>) -> TagSerializer<Self> {
        let inner_out = inner.clone();
        TagSerializer::new(
            move |tag| match tag {
                Tag::Compound(_) => {
                    let fields = tag.reader()?;
                    Ok(FilteredText {
                        raw: fields.read("raw", &inner)?,
                        filtered: fields.read_opt("filtered", &inner)?,
                    })
                }
                other => Ok(FilteredText::plain(inner.read(other)?)),
            },
            move |text: &FilteredText<T>| {
                CompoundBuilder::new()
                    .put("raw", inner_out.write(&text.raw))
                    .put_opt("filtered", text.filtered.as_ref().map(|value| inner_out.write(value)))
                    .build()
            },
        )
    }
}

/// Pages of an unsigned book and quill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WritableBookContent {
    /// Page texts.
    pub pages: Vec<FilteredText<String>>,
}

impl WritableBookContent {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        FilteredText::network_type(types::string())
            .list(MAX_PAGES)
            .map(
                |pages| WritableBookContent { pages },
                |book: &WritableBookContent| book.pages.clone(),
            )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        let pages = FilteredText::tag_serializer(tag::string()).list();
        let pages_out = pages.clone();
        TagSerializer::new(
            move |tag| {
                let pages = tag.reader()?.read_or("pages", &pages, Vec::new())?;
                check_pages(pages.len())?;
                Ok(WritableBookContent { pages })
            },
            move |book: &WritableBookContent| {
                CompoundBuilder::new()
                    .put("pages", pages_out.write(&book.pages))
                    .build()
            },
        )
    }
}

fn check_pages(len: usize) -> Result<(), CodecError> {
    if len > MAX_PAGES {
        return Err(CodecError::ListTooLong {
            len,
            max: MAX_PAGES,
        });
    }
    Ok(())
}

/// Contents of a signed book.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenBookContent {
    /// Book title.
    pub title: FilteredText<String>,
    /// Author name.
    pub author: String,
    /// Copy generation: 0 original, up to 3 for a copy of a copy.
    pub generation: i32,
    /// Page components.
    pub pages: Vec<FilteredText<Text>>,
    /// Whether selectors and scores in pages were resolved.
    pub resolved: bool,
}

impl WrittenBookContent {
    /// Binary codec.
    pub fn network_type() -> NetworkType<Self> {
        let title = FilteredText::network_type(types::string());
        let pages = FilteredText::network_type(types::text()).list(MAX_PAGES);
        let (title_out, pages_out) = (title.clone(), pages.clone());
        NetworkType::new(
            move |buf| {
                Ok(WrittenBookContent {
                    title: title.read(buf)?,
                    author: buf.read_string()?,
                    generation: buf.read_var_int()?,
                    pages: pages.read(buf)?,
                    resolved: buf.read_bool()?,
                })
            },
            move |buf, book: &WrittenBookContent| {
                title_out.write(buf, &book.title)?;
                buf.write_string(&book.author)?;
                buf.write_var_int(book.generation);
                pages_out.write(buf, &book.pages)?;
                buf.write_bool(book.resolved);
                Ok(())
            },
        )
    }

    /// Tag codec.
    pub fn tag_serializer() -> TagSerializer<Self> {
        let title = FilteredText::tag_serializer(tag::string());
        let pages = FilteredText::tag_serializer(tag::text()).list();
        let (title_out, pages_out) = (title.clone(), pages.clone());
        TagSerializer::new(
            move |tag| {
                let fields = tag.reader()?;
                let pages = fields.read_or("pages", &pages, Vec::new())?;
                check_pages(pages.len())?;
                Ok(WrittenBookContent {
                    title: fields.read("title", &title)?,
                    author: fields.string("author")?,
                    generation: fields.int_or("generation", 0)?,
                    pages,
                    resolved: fields.bool_or("resolved", false)?,
                })
            },
            move |book: &WrittenBookContent| {
                CompoundBuilder::new()
                    .put("title", title_out.write(&book.title))
                    .put("author", book.author.as_str())
                    .put("generation", book.generation)
                    .put("pages", pages_out.write(&book.pages))
                    .put("resolved", book.resolved)
                    .build()
            },
        )
    }
}
