//! Navigation port definition.

/// Port for the client's navigation surface.
///
/// The request pipeline uses it to escalate a failed renewal into a hard
/// redirect to the login entry point.
#[cfg_attr(test, mockall::automock)]
pub trait NavigationPort: Send + Sync {
    /// Returns the full path the client is currently showing, if any.
    fn current_location(&self) -> Option<String>;

    /// Sends the client to the login entry point, remembering where to return.
    fn redirect_to_login(&self, return_to: Option<String>);
}
