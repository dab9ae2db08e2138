use crate::facebook::select::select_media_url;
use crate::facebook::types::{NormalizedMedia, NormalizedPost, RawPost};
use crate::images::ImageStore;

/// Only images served from the Facebook CDN family are worth keeping;
/// everything else the scraper picked up is profile chrome or link previews.
const CDN_MARKER: &str = "fbcdn";

/// Build a [`NormalizedPost`] from one raw record, fetching its images as a
/// side effect. Returns `None` when the post is excluded.
///
/// Exclusion rules, in order:
/// 1. no text and the export never had a `media` key;
/// 2. the first media element carries `title_with_entities` (Facebook's
///    unavailable-content placeholder), regardless of text;
/// 3. after media processing, neither text nor any surviving media entry.
pub async fn normalize_post(raw: &RawPost, id: u64, images: &ImageStore) -> Option<NormalizedPost> {
    let mut post = NormalizedPost {
        id,
        text: raw.text.clone().unwrap_or_default(),
        url: raw.url.clone().unwrap_or_default(),
        likes: raw.likes.unwrap_or(0),
        comments: raw.comments.unwrap_or(0),
        shares: raw.shares.unwrap_or(0),
        media: Vec::new(),
    };

    if post.text.is_empty() && raw.media.is_none() {
        return None;
    }

    if let Some(items) = &raw.media {
        if items.first().is_some_and(|m| m.title_with_entities.is_some()) {
            tracing::debug!(id, "post.unavailable_content");
            return None;
        }

        for item in items {
            // A foreign typename only skips the item when it also lacks
            // both url-bearing keys; otherwise it falls through to the
            // selector. Inherited verbatim from the original cleaner —
            // some Link/GenericAttachment items do carry usable thumbnails.
            let typename_ok = matches!(
                item.typename.as_deref(),
                None | Some("Photo") | Some("Video")
            );
            if !typename_ok && item.thumbnail.is_none() && item.image.is_none() {
                continue;
            }

            let Some(url) = select_media_url(item) else {
                continue;
            };
            if !url.contains(CDN_MARKER) {
                continue;
            }

            if let Some(local_path) = images.fetch(url).await {
                post.media.push(NormalizedMedia {
                    local_path,
                    ocr_text: item.ocr_text.clone().unwrap_or_default(),
                    kind: item.typename.clone().unwrap_or_else(|| "Photo".to_string()),
                    original_id: item.id.clone().unwrap_or_default(),
                });
            }
        }
    }

    if post.text.is_empty() && post.media.is_empty() {
        return None;
    }
    Some(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use addis_http::HttpClient;
    use serde_json::json;
    use std::path::Path;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn raw(v: serde_json::Value) -> RawPost {
        serde_json::from_value(v).unwrap()
    }

    fn store_in(dir: &Path) -> ImageStore {
        ImageStore::new(dir, "/images/posts", HttpClient::new().unwrap())
    }

    /// Pre-seed the store so a fetch for `url` is a guaranteed cache hit.
    fn seed(dir: &Path, url: &str) {
        std::fs::write(dir.join(ImageStore::filename_for(url)), b"seed").unwrap();
    }

    #[tokio::test]
    async fn text_only_post_is_kept_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let post = normalize_post(
            &raw(json!({ "text": "hello", "likes": 3 })),
            1,
            &store_in(dir.path()),
        )
        .await
        .unwrap();

        assert_eq!(post.id, 1);
        assert_eq!(post.text, "hello");
        assert_eq!(post.url, "");
        assert_eq!(post.likes, 3);
        assert_eq!(post.comments, 0);
        assert_eq!(post.shares, 0);
        assert!(post.media.is_empty());
    }

    #[tokio::test]
    async fn no_text_and_no_media_key_is_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(normalize_post(&raw(json!({})), 1, &store).await.is_none());
        assert!(
            normalize_post(&raw(json!({ "text": "", "likes": 9 })), 2, &store)
                .await
                .is_none()
        );
    }

    // An empty media list is not the same as a missing key: the post gets
    // past the first gate and is only dropped at the final inclusion test.
    #[tokio::test]
    async fn empty_media_list_without_text_is_excluded_at_final_gate() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(
            normalize_post(&raw(json!({ "text": "", "media": [] })), 1, &store)
                .await
                .is_none()
        );
        let kept = normalize_post(&raw(json!({ "text": "hi", "media": [] })), 2, &store)
            .await
            .unwrap();
        assert!(kept.media.is_empty());
    }

    #[tokio::test]
    async fn unavailable_content_marker_excludes_regardless_of_text() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let post = json!({
            "text": "still has text",
            "media": [{ "title_with_entities": { "text": "This content isn't available" } }]
        });
        assert!(normalize_post(&raw(post), 1, &store).await.is_none());
    }

    #[tokio::test]
    async fn cdn_media_is_fetched_and_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let url = "http://x.fbcdn.net/a.jpg";
        seed(dir.path(), url);

        let post = normalize_post(
            &raw(json!({ "text": "", "media": [{ "thumbnail": url }] })),
            1,
            &store_in(dir.path()),
        )
        .await
        .unwrap();

        assert_eq!(post.media.len(), 1);
        assert_eq!(
            post.media[0].local_path,
            "/images/posts/a1989bda4217099f8c7853c44e683b31.jpg"
        );
        assert_eq!(post.media[0].ocr_text, "");
        assert_eq!(post.media[0].kind, "Photo");
        assert_eq!(post.media[0].original_id, "");
    }

    #[tokio::test]
    async fn media_fields_are_carried_through() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://scontent.fbcdn.net/v/t39/photo_1.jpg";
        seed(dir.path(), url);

        let post = normalize_post(
            &raw(json!({
                "media": [{
                    "__typename": "Video",
                    "thumbnail": url,
                    "ocrText": "birr exchange rates",
                    "id": "vid:123"
                }]
            })),
            7,
            &store_in(dir.path()),
        )
        .await
        .unwrap();

        assert_eq!(post.media[0].kind, "Video");
        assert_eq!(post.media[0].ocr_text, "birr exchange rates");
        assert_eq!(post.media[0].original_id, "vid:123");
    }

    #[tokio::test]
    async fn non_cdn_url_is_silently_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let media = json!([{ "thumbnail": "https://example.com/img.png" }]);

        let kept = normalize_post(
            &raw(json!({ "text": "kept", "media": media.clone() })),
            1,
            &store,
        )
        .await
        .unwrap();
        assert!(kept.media.is_empty());

        // Without text the post has nothing left and is excluded.
        assert!(
            normalize_post(&raw(json!({ "media": media })), 2, &store)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn foreign_typename_without_url_keys_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let url = "http://x.fbcdn.net/a.jpg";
        seed(dir.path(), url);

        // fallback_image would resolve, but the item is skipped before the
        // selector ever runs.
        let post = normalize_post(
            &raw(json!({
                "text": "kept",
                "media": [{ "__typename": "Link", "fallback_image": { "uri": url } }]
            })),
            1,
            &store_in(dir.path()),
        )
        .await
        .unwrap();
        assert!(post.media.is_empty());
    }

    #[tokio::test]
    async fn foreign_typename_with_thumbnail_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let url = "http://x.fbcdn.net/a.jpg";
        seed(dir.path(), url);

        let post = normalize_post(
            &raw(json!({
                "media": [{ "__typename": "Link", "thumbnail": url }]
            })),
            1,
            &store_in(dir.path()),
        )
        .await
        .unwrap();

        // The quirk lets the item through, typename and all.
        assert_eq!(post.media.len(), 1);
        assert_eq!(post.media[0].kind, "Link");
    }

    #[tokio::test]
    async fn failed_download_contributes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let url = format!("{}/fbcdn/broken.jpg", server.uri());

        let post = normalize_post(
            &raw(json!({ "text": "survives", "media": [{ "thumbnail": url }] })),
            1,
            &store_in(dir.path()),
        )
        .await
        .unwrap();
        assert!(post.media.is_empty());
    }
}
