//! Path utilities: expand `~` in configured directories.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde("/tmp/poilog"), PathBuf::from("/tmp/poilog"));
        assert_eq!(expand_tilde("data/~x"), PathBuf::from("data/~x"));
    }

    #[test]
    fn tilde_prefix_uses_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/.poilog"), home.join(".poilog"));
            assert_eq!(expand_tilde("~"), home);
        }
    }
}
