//! **nanodoc** - Minimalist CLI for bundling text files into a single readable document
//!
//! Line-range selectors, bundle manifests with inline inclusion markers, styled
//! headers, and a two-pass table of contents with exact line-number projection.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core pipeline - resolution, extraction, and two-pass assembly
pub mod core {
    /// Error taxonomy shared across the pipeline
    pub mod error;
    pub use error::NanodocError;

    /// Line-reference selector parsing (`L5`, `L10-15`, `L20-X`)
    pub mod range;
    pub use range::{LineRange, RangeEnd, parse_selector};

    /// Validated file + ranges unit with write-once content cache
    pub mod item;
    pub use item::ContentItem;

    /// Argument expansion: files, directories, bundle manifests
    pub mod resolve;
    pub use resolve::{FileReference, expand_args};

    /// Bundle manifest save/load (the external-tooling seam)
    pub mod bundle;
    pub use bundle::Bundle;

    /// Header styling and sequence prefixes
    pub mod format;
    pub use format::{NameStyle, SequenceStyle};

    /// Two-pass document assembly and top-level orchestration
    pub mod assemble;
    pub use assemble::{AssembleOptions, NumberingMode, run as assemble_run};
}

/// Infrastructure - Configuration, I/O, and directory walking
pub mod infra {
    /// Configuration management with TOML support and env overrides
    pub mod config;
    pub use config::{Config, Strictness, load_config};

    /// Memory-mapped file I/O for large files (>1MB threshold)
    pub mod io;
    pub use io::{FileContent, read_file_smart};

    /// CRLF/LF-robust line indexing for line→byte span mapping
    pub mod lines;
    pub use lines::NewlineIndex;

    /// Gitignore-aware directory expansion with extension allow-list
    pub mod walk;
    pub use walk::DirectoryWalker;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli};
pub use crate::core::{
    AssembleOptions, Bundle, ContentItem, NameStyle, NanodocError, NumberingMode, SequenceStyle,
    assemble_run,
};
pub use infra::{Config, Strictness, load_config};
