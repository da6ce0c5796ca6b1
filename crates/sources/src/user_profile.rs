//! Build a UserProfile from the TravelIndex.

use crate::types::UserProfile;
use data_loader::{TravelIndex, UserId};
use tracing::debug;

/// Gather a user's rows and visited set.
///
/// Unknown users get an empty profile rather than an error: deciding what
/// "no data" means is up to the caller.
pub fn build_user_profile(data_index: &TravelIndex, user_id: UserId) -> UserProfile {
    let mut profile = UserProfile::new(user_id);

    for row in data_index.user_rows(user_id) {
        profile.visited.insert(row.attraction_id);
        profile.history.push(row.clone());
    }

    debug!(
        "Built profile for user {} ({} rows, {} attractions)",
        user_id,
        profile.history.len(),
        profile.visited.len()
    );
    profile
}
