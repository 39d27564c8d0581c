//! Who may look at whose events
//!
//! A viewer sees the events a user created once the viewer follows them in
//! any group. Events the user takes part in are only shown to friends, that
//! is followers filed under a group other than `FOLLOWER`.

use shared::models::Follower;
use shared::{Error, Result};

/// Nobody browses their own events through the friends endpoints
pub fn ensure_other_user(viewer_id: i64, target_id: i64) -> Result<()> {
    if viewer_id == target_id {
        return Err(Error::forbidden("Use the private endpoints to see your own events"));
    }
    Ok(())
}

/// The viewer must follow the target in some group
pub fn ensure_can_see_created(follower: Option<&Follower>) -> Result<()> {
    match follower {
        Some(_) => Ok(()),
        None => Err(Error::forbidden("Available to subscribers only")),
    }
}

/// Group the viewer was filed under, provided it is a friendship group
pub fn friendship_group(follower: Option<&Follower>) -> Result<i64> {
    match follower {
        Some(f) if f.is_friend() => Ok(f.group_id),
        _ => Err(Error::forbidden("Available to friends only")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{GROUP_FOLLOWER, GROUP_FRIENDS_ALL};

    fn follower(group_id: i64, group_title: &str) -> Follower {
        Follower {
            id: 1,
            publisher_id: 10,
            follower_id: 20,
            follower_name: "Ann".to_string(),
            group_id,
            group_title: group_title.to_string(),
        }
    }

    #[test]
    fn test_self_view_is_forbidden() {
        let err = ensure_other_user(5, 5).unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert!(ensure_other_user(5, 6).is_ok());
    }

    #[test]
    fn test_created_events_need_any_subscription() {
        assert!(ensure_can_see_created(Some(&follower(3, GROUP_FOLLOWER))).is_ok());
        assert_eq!(ensure_can_see_created(None).unwrap_err().status_code(), 403);
    }

    #[test]
    fn test_plain_follower_is_not_a_friend() {
        let plain = follower(3, GROUP_FOLLOWER);
        assert_eq!(friendship_group(Some(&plain)).unwrap_err().status_code(), 403);
        assert!(friendship_group(None).is_err());
    }

    #[test]
    fn test_friend_group_is_returned() {
        assert_eq!(friendship_group(Some(&follower(4, GROUP_FRIENDS_ALL))).unwrap(), 4);
        assert_eq!(friendship_group(Some(&follower(9, "CLOSE"))).unwrap(), 9);
    }
}
