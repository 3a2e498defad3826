pub mod enum_registry;
pub mod legacy_to_view;
pub mod name_normalizer;
pub mod naming_convention;
pub mod swagger2_to_view;
pub mod type_resolver;

use crate::config::BuildOptions;
use crate::error::BuildError;
use crate::parse::Document;
use crate::view::ViewModel;

pub use legacy_to_view::build_legacy;
pub use swagger2_to_view::build_swagger2;

/// Build the view model of a parsed document, dispatching on its dialect.
///
/// Every call owns its own enum registry and method-name set, so independent
/// builds never share names.
pub fn build(document: &Document, options: &BuildOptions) -> Result<ViewModel, BuildError> {
    match document {
        Document::Swagger2(spec) => build_swagger2(spec, options),
        Document::Legacy(spec) => build_legacy(spec, options),
    }
}
