/// Configuration options for building a project tree from disk.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Maximum depth to recurse (None = unlimited). Directories at the limit
    /// are returned empty and flagged as loading.
    pub max_depth: Option<usize>,

    /// Include hidden files/directories (starting with .)
    pub include_hidden: bool,

    /// Follow symbolic links
    pub follow_symlinks: bool,

    /// Expand the root node
    pub expand_root: bool,
}

impl ScanOptions {
    /// Create a new ScanOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum recursion depth; 0 means unlimited
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = (depth > 0).then_some(depth);
        self
    }

    /// Set whether to include hidden files
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_expand_root(mut self, expand: bool) -> Self {
        self.expand_root = expand;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ScanOptions::default();
        assert_eq!(opts.max_depth, None);
        assert!(!opts.include_hidden);
        assert!(!opts.follow_symlinks);
        assert!(!opts.expand_root);
    }

    #[test]
    fn test_zero_depth_is_unlimited() {
        assert_eq!(ScanOptions::new().with_max_depth(0).max_depth, None);
        assert_eq!(ScanOptions::new().with_max_depth(3).max_depth, Some(3));
    }
}
