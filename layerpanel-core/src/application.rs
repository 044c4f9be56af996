//! Application state the store depends on but does not own

use crate::id::DocumentId;

/// Resolves the document the user is currently working in
///
/// Targeted layer events (visibility, locking) carry only a layer ID; the
/// store asks this resolver which document they belong to.
pub trait ActiveDocument {
    /// ID of the current document, if any document is open
    fn current_document_id(&self) -> Option<DocumentId>;
}

impl ActiveDocument for DocumentId {
    fn current_document_id(&self) -> Option<DocumentId> {
        Some(*self)
    }
}

impl ActiveDocument for Option<DocumentId> {
    fn current_document_id(&self) -> Option<DocumentId> {
        *self
    }
}

impl<T: ActiveDocument + ?Sized> ActiveDocument for &T {
    fn current_document_id(&self) -> Option<DocumentId> {
        (**self).current_document_id()
    }
}
