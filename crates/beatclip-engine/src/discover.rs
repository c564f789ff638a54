//! Source file discovery.

use std::path::Path;

use beatclip_models::VideoPool;

use crate::error::AssemblyResult;

/// Extensions accepted as audio tracks.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "m4a", "ogg", "aac"];
/// Extensions accepted as pool videos.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm", "avi"];

/// List candidate audio tracks in a directory, sorted by name.
pub async fn list_audio_tracks(dir: impl AsRef<Path>) -> AssemblyResult<Vec<String>> {
    list_by_extension(dir.as_ref(), AUDIO_EXTENSIONS).await
}

/// Build the video pool from a directory listing.
pub async fn list_video_pool(dir: impl AsRef<Path>) -> AssemblyResult<VideoPool> {
    let files = list_by_extension(dir.as_ref(), VIDEO_EXTENSIONS).await?;
    Ok(VideoPool::new(files))
}

async fn list_by_extension(dir: &Path, extensions: &[&str]) -> AssemblyResult<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
            .unwrap_or(false);
        if !matches {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_only_matching_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["one.mp3", "two.MP3", "clip.mp4", "notes.txt"] {
            tokio::fs::write(dir.path().join(name), b"x").await.unwrap();
        }

        let audio = list_audio_tracks(dir.path()).await.unwrap();
        assert_eq!(audio, vec!["one.mp3", "two.MP3"]);

        let pool = list_video_pool(dir.path()).await.unwrap();
        assert_eq!(pool.as_slice(), ["clip.mp4"]);
    }

    #[tokio::test]
    async fn test_empty_directory_gives_empty_pool() {
        let dir = tempfile::tempdir().unwrap();
        let pool = list_video_pool(dir.path()).await.unwrap();
        assert!(pool.is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_errors() {
        assert!(list_video_pool("/nonexistent/videos").await.is_err());
    }
}
