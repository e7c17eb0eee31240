// SPDX-License-Identifier: PMPL-1.0-or-later
//! robots.txt parsing.
//!
//! Groups consecutive `User-agent` lines with the `Allow`/`Disallow` rules
//! that follow them. Matching is the substring semantics crawlers use: a
//! group applies to a bot when one of its user-agent tokens is `*` or
//! appears (case-insensitively) in the bot's name.

use serde::{Deserialize, Serialize};

/// A parsed robots.txt file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobotsTxt {
    pub groups: Vec<RobotsGroup>,
}

/// One user-agent group and its rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobotsGroup {
    pub user_agents: Vec<String>,
    pub disallow: Vec<String>,
    pub allow: Vec<String>,
}

impl RobotsGroup {
    fn applies_to(&self, bot: &str) -> bool {
        let bot_lower = bot.to_lowercase();
        self.user_agents
            .iter()
            .any(|ua| ua == "*" || bot_lower.contains(&ua.to_lowercase()))
    }
}

impl RobotsTxt {
    /// Parse robots.txt text. Unknown directives and comments are ignored.
    pub fn parse(text: &str) -> Self {
        let mut groups: Vec<RobotsGroup> = Vec::new();
        let mut current: Option<RobotsGroup> = None;
        // Consecutive user-agent lines accumulate into one group; the first
        // rule directive after them closes the accumulation.
        let mut accepting_agents = false;

        for raw_line in text.lines() {
            let line = match raw_line.find('#') {
                Some(idx) => &raw_line[..idx],
                None => raw_line,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            let directive = directive.trim().to_lowercase();
            let value = value.trim();

            match directive.as_str() {
                "user-agent" => {
                    if !accepting_agents {
                        if let Some(group) = current.take() {
                            groups.push(group);
                        }
                        current = Some(RobotsGroup::default());
                        accepting_agents = true;
                    }
                    if let Some(ref mut group) = current {
                        group.user_agents.push(value.to_string());
                    }
                }
                "disallow" => {
                    accepting_agents = false;
                    if let Some(ref mut group) = current {
                        if !value.is_empty() {
                            group.disallow.push(value.to_string());
                        }
                    }
                }
                "allow" => {
                    accepting_agents = false;
                    if let Some(ref mut group) = current {
                        if !value.is_empty() {
                            group.allow.push(value.to_string());
                        }
                    }
                }
                _ => {
                    accepting_agents = false;
                }
            }
        }

        if let Some(group) = current.take() {
            groups.push(group);
        }

        Self { groups }
    }

    /// Whether any group applying to `bot` disallows the entire site.
    ///
    /// Only a `Disallow` entry of exactly `/` counts as a full block;
    /// path-scoped disallows leave the bot with access.
    pub fn blocks_entirely(&self, bot: &str) -> bool {
        self.groups
            .iter()
            .filter(|g| g.applies_to(bot))
            .any(|g| g.disallow.iter().any(|d| d == "/"))
    }
}
