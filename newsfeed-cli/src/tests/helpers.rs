//! Fixture files for driving the recommend command from disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Reference time shared by every fixture.
pub(super) const NOW: &str = "2024-05-01T12:00:00Z";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory holding candidate and activity files.
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) candidates: Utf8PathBuf,
    pub(super) activity: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let candidates = root.join("candidates.json");
        let activity = root.join("activity.json");
        Self {
            _dir: dir,
            root,
            candidates,
            activity,
        }
    }

    /// Write a bakery story and a rocket story, both published on the
    /// reference day, plus a withdrawn placeholder.
    pub(super) fn write_candidates(&self) {
        write_utf8(&self.candidates, CANDIDATES.as_bytes());
    }

    /// Write three rocket likes for the reader.
    pub(super) fn write_activity(&self) {
        write_utf8(&self.activity, ACTIVITY.as_bytes());
    }
}

const CANDIDATES: &str = r#"[
  {
    "source": { "id": null, "name": "Local Times" },
    "title": "Local bakery opens",
    "description": null,
    "url": "https://n/bakery",
    "publishedAt": "2024-05-01T09:00:00Z"
  },
  {
    "source": { "id": "wire", "name": "Wire" },
    "title": "SpaceX rocket launch today",
    "description": "Crew named for the launch",
    "url": "https://n/rocket",
    "publishedAt": "2024-05-01T08:00:00Z"
  },
  {
    "source": { "id": null, "name": null },
    "title": "[Removed]",
    "description": "[Removed]",
    "url": "https://removed.com",
    "publishedAt": "1970-01-01T00:00:00Z"
  }
]"#;

const ACTIVITY: &str = r#"[
  {
    "article_url": "https://n/liked-0",
    "article_title": "Rocket launch",
    "action_type": "like",
    "timestamp": "2024-05-01T11:00:00Z"
  },
  {
    "article_url": "https://n/liked-1",
    "article_title": "Rocket engine",
    "action_type": "like",
    "timestamp": "2024-05-01T10:00:00Z"
  },
  {
    "article_url": "https://n/liked-2",
    "article_title": "Rocket crew",
    "action_type": "like",
    "timestamp": "2024-05-01T09:00:00Z"
  }
]"#;
