//! The API endpoints URIs.

/// The root route which renders the tracker page.
pub const ROOT: &str = "/";
/// The web app manifest, served from the asset directory.
pub const MANIFEST: &str = "/manifest.json";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a transaction from the draft.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to pick the draft's transaction type and open the entry form.
pub const DRAFT_TYPE_API: &str = "/api/draft/type";
/// The route to update one or more draft fields.
pub const DRAFT_FIELDS_API: &str = "/api/draft/fields";
/// The route to discard the draft and close the entry form.
pub const DRAFT_CANCEL_API: &str = "/api/draft/cancel";
/// The route to clear all transactions and local storage.
pub const RESET_API: &str = "/api/reset";
