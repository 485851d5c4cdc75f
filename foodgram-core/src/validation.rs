//! Checks applied to submitted recipes, tags and users before they reach the database.

use crate::error::ValidationError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use validator::{ValidateEmail, ValidateLength};

pub const MIN_COOKING_TIME: i32 = 1;
pub const MIN_INGREDIENT_AMOUNT: i32 = 1;

pub const RECIPE_NAME_MAX_LENGTH: usize = 256;
pub const TAG_NAME_MAX_LENGTH: usize = 32;
pub const INGREDIENT_NAME_MAX_LENGTH: usize = 128;
pub const MEASUREMENT_UNIT_MAX_LENGTH: usize = 64;
pub const EMAIL_MAX_LENGTH: usize = 254;
pub const USERNAME_MAX_LENGTH: usize = 150;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern is valid"));

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid"));

/// An ingredient reference in a recipe submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub id: i32,
    pub amount: i32,
}

/// Ingredient list must be non-empty, each amount positive and each ingredient listed once.
pub fn validate_ingredients(items: &[IngredientAmount]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::NoIngredients);
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(ValidationError::DuplicateIngredient(item.id));
        }
        if item.amount < MIN_INGREDIENT_AMOUNT {
            return Err(ValidationError::AmountTooSmall {
                min: MIN_INGREDIENT_AMOUNT,
            });
        }
    }

    Ok(())
}

/// Tag list must be non-empty with no repeats.
pub fn validate_tag_ids(ids: &[i32]) -> Result<(), ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::NoTags);
    }

    let mut seen = HashSet::with_capacity(ids.len());
    for &id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateTag(id));
        }
    }

    Ok(())
}

pub fn validate_cooking_time(minutes: i32) -> Result<(), ValidationError> {
    if minutes < MIN_COOKING_TIME {
        return Err(ValidationError::CookingTimeTooShort {
            min: MIN_COOKING_TIME,
        });
    }
    Ok(())
}

/// Trim a required text field and check its length (in characters).
pub fn require_text<'a>(
    field: &'static str,
    value: &'a str,
    max: usize,
) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if !trimmed.validate_length(None, Some(max as u64), None) {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed)
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if !slug.validate_length(None, Some(TAG_NAME_MAX_LENGTH as u64), None) {
        return Err(ValidationError::TooLong {
            field: "slug",
            max: TAG_NAME_MAX_LENGTH,
        });
    }
    if !SLUG_RE.is_match(slug) {
        return Err(ValidationError::InvalidSlug);
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    require_text("username", username, USERNAME_MAX_LENGTH)?;
    if !USERNAME_RE.is_match(username) {
        return Err(ValidationError::InvalidUsername);
    }
    Ok(())
}

/// HTML5-style address check (local part, `@`, hostname labels).
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    require_text("email", email, EMAIL_MAX_LENGTH)?;
    if !email.validate_email() {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, amount: i32) -> IngredientAmount {
        IngredientAmount { id, amount }
    }

    #[test]
    fn test_ingredients_ok() {
        assert_eq!(validate_ingredients(&[item(1, 5), item(2, 1)]), Ok(()));
    }

    #[test]
    fn test_duplicate_ingredient() {
        assert_eq!(
            validate_ingredients(&[item(1, 5), item(2, 3), item(1, 10)]),
            Err(ValidationError::DuplicateIngredient(1))
        );
    }

    #[test]
    fn test_empty_ingredients() {
        assert_eq!(
            validate_ingredients(&[]),
            Err(ValidationError::NoIngredients)
        );
    }

    #[test]
    fn test_zero_amount() {
        assert_eq!(
            validate_ingredients(&[item(1, 0)]),
            Err(ValidationError::AmountTooSmall { min: 1 })
        );
    }

    #[test]
    fn test_tags() {
        assert_eq!(validate_tag_ids(&[1, 2, 3]), Ok(()));
        assert_eq!(validate_tag_ids(&[]), Err(ValidationError::NoTags));
        assert_eq!(
            validate_tag_ids(&[4, 2, 4]),
            Err(ValidationError::DuplicateTag(4))
        );
    }

    #[test]
    fn test_cooking_time() {
        assert_eq!(validate_cooking_time(1), Ok(()));
        assert_eq!(
            validate_cooking_time(0),
            Err(ValidationError::CookingTimeTooShort { min: 1 })
        );
        assert!(validate_cooking_time(-5).is_err());
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("name", "  Borscht ", 256), Ok("Borscht"));
        assert_eq!(
            require_text("name", "   ", 256),
            Err(ValidationError::Empty("name"))
        );
        assert_eq!(
            require_text("name", "Щи", 1),
            Err(ValidationError::TooLong {
                field: "name",
                max: 1
            })
        );
    }

    #[test]
    fn test_slug() {
        assert_eq!(validate_slug("breakfast"), Ok(()));
        assert_eq!(validate_slug("late-night_snack2"), Ok(()));
        assert_eq!(validate_slug("завтрак"), Err(ValidationError::InvalidSlug));
        assert_eq!(validate_slug("two words"), Err(ValidationError::InvalidSlug));
        assert_eq!(validate_slug(""), Err(ValidationError::InvalidSlug));
    }

    #[test]
    fn test_username() {
        assert_eq!(validate_username("chef.ivan+1@home"), Ok(()));
        assert_eq!(
            validate_username("chef ivan"),
            Err(ValidationError::InvalidUsername)
        );
    }

    #[test]
    fn test_email() {
        assert_eq!(validate_email("cook@example.com"), Ok(()));
        assert_eq!(
            validate_email("cook.example.com"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("a@b@c.com"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(validate_email("cook@localhost"), Ok(()));
    }

    #[test]
    fn test_email_rejects_malformed_domains() {
        for email in ["a@b..c", "a@-b.c", "a@b.c-", "a@.b.c", "cook @example.com"] {
            assert_eq!(
                validate_email(email),
                Err(ValidationError::InvalidEmail),
                "{email}"
            );
        }
    }

    #[test]
    fn test_email_length_limit() {
        let long = format!("{}@example.com", "a".repeat(EMAIL_MAX_LENGTH));
        assert!(matches!(
            validate_email(&long),
            Err(ValidationError::TooLong { field: "email", .. })
        ));
    }
}
