pub mod error;
pub mod image;
pub mod pdf;
pub mod shopping_list;
pub mod short_link;
pub mod toggle;
pub mod validation;

pub use error::{FontError, ImageError, RenderError, ShortLinkError, ValidationError};
pub use image::{decode_data_uri, DecodedImage};
pub use pdf::{render_shopping_list, PdfFonts};
pub use shopping_list::{aggregate, ShoppingListLine};
pub use toggle::{activate, deactivate, Insertion, RelationKind, RelationStore, ToggleError};
pub use validation::IngredientAmount;
