use crate::{Context, Error};
use poise::serenity_prelude::{CreateActionRow, CreateAllowedMentions, CreateAttachment};
use poise::CreateReply;

/// Discord refuses messages longer than this
pub const MESSAGE_LIMIT: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionPolicy {
    /// Whatever Discord does by default
    Default,
    /// Nobody gets pinged
    Suppressed,
    /// Roles still work, users don't
    NoUsers,
}

impl MentionPolicy {
    fn allowed_mentions(self) -> Option<CreateAllowedMentions> {
        match self {
            MentionPolicy::Default => None,
            MentionPolicy::Suppressed => Some(CreateAllowedMentions::new()),
            MentionPolicy::NoUsers => Some(CreateAllowedMentions::new().all_roles(true)),
        }
    }
}

/// What a command wants to answer with, before it touches Discord
#[derive(Debug, Clone)]
pub enum Reply {
    Text { content: String, mentions: MentionPolicy },
    Attachment { name: String, data: Vec<u8> },
    Components { content: String, components: Vec<CreateActionRow> },
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Reply::Text { content: content.into(), mentions: MentionPolicy::Default }
    }
}

pub async fn send_reply(ctx: Context<'_>, reply: Reply) -> Result<(), Error> {
    match reply {
        Reply::Text { content, mentions } => safe_reply(ctx, &content, mentions).await,
        Reply::Attachment { name, data } => {
            ctx.send(CreateReply::default().attachment(CreateAttachment::bytes(data, name)))
                .await?;
            Ok(())
        }
        Reply::Components { content, components } => {
            ctx.send(CreateReply::default().content(content).components(components)).await?;
            Ok(())
        }
    }
}

/// Sends text of any length, split over as many messages as it takes
pub async fn safe_reply(
    ctx: Context<'_>, content: &str, mentions: MentionPolicy,
) -> Result<(), Error> {
    for chunk in split_message(content, MESSAGE_LIMIT) {
        let mut reply = CreateReply::default().content(chunk);
        if let Some(allowed_mentions) = mentions.allowed_mentions() {
            reply = reply.allowed_mentions(allowed_mentions);
        }
        ctx.send(reply).await?;
    }
    Ok(())
}

/// Splits on line breaks where possible, hard-splits lines that are too long on their own.
/// `limit` counts chars, not bytes.
pub fn split_message(content: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in content.split('\n') {
        let line_len = line.chars().count();
        let separator = usize::from(!current.is_empty());
        if current_len + separator + line_len <= limit {
            if separator == 1 {
                current.push('\n');
            }
            current.push_str(line);
            current_len += separator + line_len;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        let mut chars = line.chars().peekable();
        while chars.peek().is_some() {
            let piece: String = chars.by_ref().take(limit).collect();
            let piece_len = piece.chars().count();
            if piece_len == limit {
                chunks.push(piece);
            } else {
                current = piece;
                current_len = piece_len;
            }
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
