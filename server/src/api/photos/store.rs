use crate::api::error::ApiError;
use crate::models::NewPhoto;
use crate::schema::photos;
use diesel::prelude::*;
use foodgram_core::DecodedImage;
use uuid::Uuid;

/// Persist an already-validated image owned by `user_id`.
pub fn store_photo(
    conn: &mut PgConnection,
    user_id: i32,
    image: &DecodedImage,
) -> Result<Uuid, ApiError> {
    let id = diesel::insert_into(photos::table)
        .values(NewPhoto {
            user_id,
            content_type: &image.content_type,
            data: &image.data,
        })
        .returning(photos::id)
        .get_result(conn)?;

    tracing::debug!(photo_id = %id, bytes = image.data.len(), "stored photo");
    Ok(id)
}

/// Remove a photo that is no longer referenced.
pub fn delete_photo(conn: &mut PgConnection, id: Uuid) -> Result<(), ApiError> {
    diesel::delete(photos::table.find(id)).execute(conn)?;
    Ok(())
}
