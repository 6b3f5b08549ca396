//! Hobby palette derived from current nodes.

use crate::model::user::UserNode;
use std::collections::BTreeSet;

/// All distinct hobbies across `users`, sorted.
pub fn hobby_catalogue(users: &[UserNode]) -> Vec<String> {
    users
        .iter()
        .flat_map(|user| user.data.hobbies.iter())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Case-insensitive substring filter over a catalogue. A blank filter keeps
/// everything.
pub fn filter_hobbies<'a>(catalogue: &'a [String], filter: &str) -> Vec<&'a str> {
    let needle = filter.trim().to_lowercase();
    catalogue
        .iter()
        .map(String::as_str)
        .filter(|hobby| hobby.to_lowercase().contains(needle.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_hobbies, hobby_catalogue};
    use crate::model::user::{UserData, UserNode};

    fn user(id: &str, hobbies: &[&str]) -> UserNode {
        UserNode::new(
            id,
            UserData::new(id, 30, hobbies.iter().map(|h| h.to_string()).collect()),
        )
    }

    #[test]
    fn catalogue_is_sorted_and_distinct() {
        let users = vec![user("a", &["go", "Chess"]), user("b", &["go", "archery"])];
        assert_eq!(hobby_catalogue(&users), vec!["Chess", "archery", "go"]);
        assert!(hobby_catalogue(&[]).is_empty());
    }

    #[test]
    fn filter_ignores_case() {
        let catalogue = vec!["Chess".to_string(), "archery".to_string(), "go".to_string()];
        assert_eq!(filter_hobbies(&catalogue, "CH"), vec!["Chess", "archery"]);
        assert_eq!(filter_hobbies(&catalogue, ""), vec!["Chess", "archery", "go"]);
        assert!(filter_hobbies(&catalogue, "xyz").is_empty());
    }
}
