use crate::facebook::types::RawMediaItem;

/// Pick the single best image URL from a media item.
///
/// Fixed priority: `thumbnail`, then `image.uri`, `photo_image.uri`,
/// `fallback_image.uri`. An empty `thumbnail` falls through to the next
/// source, but an empty nested `uri` is returned as-is — the caller's CDN
/// gate drops it, and nothing below it is consulted. That asymmetry is
/// inherited from the original cleaner and kept on purpose.
///
/// ```
/// use addis_ingest::facebook::select_media_url;
/// use addis_ingest::facebook::types::RawMediaItem;
///
/// let item = RawMediaItem {
///     thumbnail: Some("https://cdn.example/t.jpg".into()),
///     ..Default::default()
/// };
/// assert_eq!(select_media_url(&item), Some("https://cdn.example/t.jpg"));
/// assert_eq!(select_media_url(&RawMediaItem::default()), None);
/// ```
pub fn select_media_url(item: &RawMediaItem) -> Option<&str> {
    if let Some(thumb) = item.thumbnail.as_deref() {
        if !thumb.is_empty() {
            return Some(thumb);
        }
    }
    for source in [&item.image, &item.photo_image, &item.fallback_image] {
        if let Some(uri) = source.as_ref().and_then(|s| s.uri.as_deref()) {
            return Some(uri);
        }
    }
    None
}
