use crate::update::IncomingUpdate;

/// A parsed `/command` with its optional trailing argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandToken {
    pub name: String,
    pub argument: Option<String>,
}

impl IncomingUpdate {
    /// Extract the bot command from this update, if any.
    ///
    /// Returns `None` for plain text. With `only_leading` the command must
    /// start at text offset 0; without it the name is returned wherever the
    /// entity sits, and no argument is offered. The argument slice begins
    /// exactly at the end of the command substring and is whitespace-trimmed,
    /// so `/go foo` yields `("go", "foo")` and `/go   ` yields `("go", "")`.
    pub fn get_command(&self, want_argument: bool, only_leading: bool) -> Option<CommandToken> {
        if self.message_type() != "bot_command" {
            return None;
        }
        let text = self.text.as_deref()?;
        let entity = self.entities.first()?;

        // offset+1 skips the leading '/'; the entity length counts the
        // slash too, hence the -1. Offsets are character indices; a range
        // past the end of the text clamps to what is there, and degenerate
        // offsets/lengths (zero, or large enough to overflow) yield no
        // command instead of panicking.
        let start = entity.offset.checked_add(1)?;
        let end = start.checked_add(entity.length.checked_sub(1)?)?;

        let name = slice_chars(text, start, end)?;

        if only_leading {
            if entity.offset != 0 {
                return None;
            }
            let argument = if want_argument {
                Some(chars_from(text, end).trim().to_string())
            } else {
                None
            };
            return Some(CommandToken { name, argument });
        }

        Some(CommandToken {
            name,
            argument: None,
        })
    }
}

fn slice_chars(text: &str, start: usize, end: usize) -> Option<String> {
    if end <= start {
        return None;
    }
    let sliced: String = text.chars().skip(start).take(end - start).collect();
    if sliced.is_empty() {
        None
    } else {
        Some(sliced)
    }
}

fn chars_from(text: &str, start: usize) -> String {
    text.chars().skip(start).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::Entity;

    fn command_update(text: &str, offset: usize, length: usize) -> IncomingUpdate {
        IncomingUpdate {
            update_kind: "message".to_string(),
            chat_id: None,
            sender_id: None,
            message_id: None,
            text: Some(text.to_string()),
            entities: vec![Entity {
                kind: "bot_command".to_string(),
                offset,
                length,
            }],
        }
    }

    fn plain_update(text: Option<&str>) -> IncomingUpdate {
        IncomingUpdate {
            update_kind: "message".to_string(),
            chat_id: None,
            sender_id: None,
            message_id: None,
            text: text.map(str::to_string),
            entities: vec![Entity::default()],
        }
    }

    #[test]
    fn leading_command_with_argument() {
        let u = command_update("/go foo", 0, 3);
        assert_eq!(
            u.get_command(true, true),
            Some(CommandToken {
                name: "go".to_string(),
                argument: Some("foo".to_string()),
            })
        );
    }

    #[test]
    fn leading_command_without_wanting_argument() {
        let u = command_update("/go foo", 0, 3);
        assert_eq!(
            u.get_command(false, true),
            Some(CommandToken {
                name: "go".to_string(),
                argument: None,
            })
        );
    }

    #[test]
    fn plain_text_has_no_command_for_any_flags() {
        let u = plain_update(Some("just a simple text message"));
        for want_argument in [false, true] {
            for only_leading in [false, true] {
                assert_eq!(u.get_command(want_argument, only_leading), None);
            }
        }
    }

    #[test]
    fn command_past_offset_zero_needs_only_leading_off() {
        let u = command_update("hey /go", 4, 3);
        assert_eq!(u.get_command(true, true), None);
        assert_eq!(
            u.get_command(true, false),
            Some(CommandToken {
                name: "go".to_string(),
                argument: None,
            })
        );
    }

    #[test]
    fn whitespace_only_argument_trims_to_empty() {
        let u = command_update("/go   ", 0, 3);
        assert_eq!(
            u.get_command(true, true),
            Some(CommandToken {
                name: "go".to_string(),
                argument: Some(String::new()),
            })
        );
    }

    #[test]
    fn multiword_argument_keeps_inner_spaces() {
        let u = command_update("/remind buy the milk", 0, 7);
        assert_eq!(
            u.get_command(true, true),
            Some(CommandToken {
                name: "remind".to_string(),
                argument: Some("buy the milk".to_string()),
            })
        );
    }

    #[test]
    fn command_entity_without_text_is_absent() {
        let mut u = command_update("/go", 0, 3);
        u.text = None;
        assert_eq!(u.get_command(true, true), None);
    }

    #[test]
    fn zero_length_entity_is_absent() {
        let u = command_update("/go", 0, 0);
        assert_eq!(u.get_command(true, true), None);
    }

    #[test]
    fn entity_past_end_of_text_clamps_to_what_is_there() {
        let u = command_update("/x", 0, 40);
        assert_eq!(
            u.get_command(false, true),
            Some(CommandToken {
                name: "x".to_string(),
                argument: None,
            })
        );
    }

    #[test]
    fn entity_offset_beyond_text_is_absent() {
        let u = command_update("/x", 10, 3);
        assert_eq!(u.get_command(false, false), None);
    }

    #[test]
    fn overflowing_offset_or_length_is_absent() {
        // A structurally valid payload may still carry garbage spans; the
        // extractor must reject them, not wrap or panic.
        let raw = serde_json::json!({
            "update_id": 1,
            "message": {
                "message_id": 5,
                "chat": {"id": 42},
                "from": {"id": 7},
                "text": "/go foo",
                "entities": [{"type": "bot_command", "offset": u64::MAX, "length": 3}]
            }
        });
        let u = crate::update::IncomingUpdate::parse(&raw).unwrap();
        for only_leading in [false, true] {
            assert_eq!(u.get_command(true, only_leading), None);
        }

        let u = command_update("/go foo", 2, usize::MAX);
        assert_eq!(u.get_command(true, false), None);
    }
}
