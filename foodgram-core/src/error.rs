use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortLinkError {
    #[error("Short link is empty")]
    Empty,

    #[error("Short link contains invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("Short link is out of range")]
    Overflow,
}

/// Rejections raised while checking a submission, before anything is persisted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("At least one ingredient is required")]
    NoIngredients,

    #[error("Ingredient {0} is listed more than once")]
    DuplicateIngredient(i32),

    #[error("Ingredient {0} does not exist")]
    UnknownIngredient(i32),

    #[error("Amount must be at least {min}")]
    AmountTooSmall { min: i32 },

    #[error("At least one tag is required")]
    NoTags,

    #[error("Tag {0} is listed more than once")]
    DuplicateTag(i32),

    #[error("Tag {0} does not exist")]
    UnknownTag(i32),

    #[error("Cooking time must be at least {min} minute")]
    CookingTimeTooShort { min: i32 },

    #[error("Slug may only contain letters, digits, hyphens and underscores")]
    InvalidSlug,

    #[error("Username may only contain letters, digits and @/./+/-/_")]
    InvalidUsername,

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Invalid image: {0}")]
    InvalidImage(#[from] ImageError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("expected a data:image/...;base64, URI")]
    NotDataUri,

    #[error("payload is not valid base64")]
    InvalidBase64,

    #[error("image is larger than {max} bytes")]
    TooLarge { max: usize },

    #[error("could not detect image format")]
    UnknownFormat,

    #[error("unsupported image format {0}")]
    UnsupportedFormat(String),
}

#[derive(Error, Debug)]
pub enum FontError {
    #[error("cannot read font {}: {source}", path.display())]
    Unreadable {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] printpdf::Error),
}
