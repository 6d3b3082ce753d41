//! Cache key construction.
//!
//! Every key class carries its own namespace prefix so snapshot, lock, and
//! rate-counter keys can never collide. Usernames are lowercased so lookups
//! are case-insensitive.

pub fn snapshot_key(version: &str, username: &str) -> String {
    format!("snapshot:{}:{}", version, username.to_lowercase())
}

pub fn lock_key(username: &str) -> String {
    format!("lock:analyze:{}", username.to_lowercase())
}

pub fn rate_ip_key(ip: &str) -> String {
    format!("rate:ip:min:{}", ip)
}

pub fn rate_user_analyze_key(username: &str) -> String {
    format!("rate:user:analyze:hour:{}", username.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usernames_are_case_insensitive() {
        assert_eq!(snapshot_key("v1", "Octocat"), snapshot_key("v1", "octocat"));
        assert_eq!(lock_key("OctoCat"), "lock:analyze:octocat");
        assert_eq!(
            rate_user_analyze_key("OCTOCAT"),
            "rate:user:analyze:hour:octocat"
        );
    }

    #[test]
    fn key_classes_do_not_collide() {
        let name = "octocat";
        let keys = [
            snapshot_key("v1", name),
            lock_key(name),
            rate_ip_key(name),
            rate_user_analyze_key(name),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn version_is_part_of_the_snapshot_key() {
        assert_ne!(snapshot_key("v1", "octocat"), snapshot_key("v2", "octocat"));
    }
}
