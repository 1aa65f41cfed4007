//! Field registries for the messaging channels.

use super::{ChannelSchema, Gate};
use crate::schema::FieldMapping as F;
use crate::schema::FieldType::{BoolFalse, BoolTrue, Csv, CsvSmart, Int, Str};

pub const CHANNELS: &[ChannelSchema] = &[TELEGRAM, DISCORD, SLACK, WHATSAPP];

pub const TELEGRAM: ChannelSchema = ChannelSchema {
    key: "telegram",
    gate: Gate::Present("TELEGRAM_BOT_TOKEN"),
    token_fields: &["botToken"],
    merge: true,
    fields: &[
        F::new("TELEGRAM_DM_POLICY", "dmPolicy", Str),
        F::new("TELEGRAM_GROUP_POLICY", "groupPolicy", Str),
        F::new("TELEGRAM_REPLY_TO_MODE", "replyToMode", Str),
        F::new("TELEGRAM_CHUNK_MODE", "chunkMode", Str),
        F::new("TELEGRAM_STREAM_MODE", "streamMode", Str),
        F::new("TELEGRAM_REACTION_NOTIFICATIONS", "reactionNotifications", Str),
        F::new("TELEGRAM_REACTION_LEVEL", "reactionLevel", Str),
        F::new("TELEGRAM_PROXY", "proxy", Str),
        F::new("TELEGRAM_WEBHOOK_URL", "webhookUrl", Str),
        F::new("TELEGRAM_WEBHOOK_SECRET", "webhookSecret", Str),
        F::new("TELEGRAM_WEBHOOK_PATH", "webhookPath", Str),
        F::new("TELEGRAM_MESSAGE_PREFIX", "messagePrefix", Str),
        F::new("TELEGRAM_LINK_PREVIEW", "linkPreview", BoolTrue),
        F::new("TELEGRAM_ACTIONS_REACTIONS", "actions.reactions", BoolTrue),
        F::new("TELEGRAM_ACTIONS_STICKER", "actions.sticker", BoolFalse),
        F::new("TELEGRAM_TEXT_CHUNK_LIMIT", "textChunkLimit", Int),
        F::new("TELEGRAM_MEDIA_MAX_MB", "mediaMaxMb", Int),
        F::new("TELEGRAM_ALLOW_FROM", "allowFrom", CsvSmart),
        F::new("TELEGRAM_GROUP_ALLOW_FROM", "groupAllowFrom", CsvSmart),
        F::new("TELEGRAM_INLINE_BUTTONS", "capabilities.inlineButtons", Str),
    ],
};

pub const DISCORD: ChannelSchema = ChannelSchema {
    key: "discord",
    gate: Gate::Present("DISCORD_BOT_TOKEN"),
    token_fields: &["token"],
    merge: true,
    fields: &[
        F::new("DISCORD_DM_POLICY", "dm.policy", Str),
        F::new("DISCORD_GROUP_POLICY", "groupPolicy", Str),
        F::new("DISCORD_REPLY_TO_MODE", "replyToMode", Str),
        F::new("DISCORD_CHUNK_MODE", "chunkMode", Str),
        F::new("DISCORD_REACTION_NOTIFICATIONS", "reactionNotifications", Str),
        F::new("DISCORD_MESSAGE_PREFIX", "messagePrefix", Str),
        F::new("DISCORD_ALLOW_BOTS", "allowBots", BoolFalse),
        F::new("DISCORD_ACTIONS_REACTIONS", "actions.reactions", BoolTrue),
        F::new("DISCORD_ACTIONS_STICKERS", "actions.stickers", BoolTrue),
        F::new("DISCORD_ACTIONS_EMOJI_UPLOADS", "actions.emojiUploads", BoolTrue),
        F::new("DISCORD_ACTIONS_STICKER_UPLOADS", "actions.stickerUploads", BoolTrue),
        F::new("DISCORD_ACTIONS_POLLS", "actions.polls", BoolTrue),
        F::new("DISCORD_ACTIONS_PERMISSIONS", "actions.permissions", BoolTrue),
        F::new("DISCORD_ACTIONS_MESSAGES", "actions.messages", BoolTrue),
        F::new("DISCORD_ACTIONS_THREADS", "actions.threads", BoolTrue),
        F::new("DISCORD_ACTIONS_PINS", "actions.pins", BoolTrue),
        F::new("DISCORD_ACTIONS_SEARCH", "actions.search", BoolTrue),
        F::new("DISCORD_ACTIONS_MEMBER_INFO", "actions.memberInfo", BoolTrue),
        F::new("DISCORD_ACTIONS_ROLE_INFO", "actions.roleInfo", BoolTrue),
        F::new("DISCORD_ACTIONS_CHANNEL_INFO", "actions.channelInfo", BoolTrue),
        F::new("DISCORD_ACTIONS_CHANNELS", "actions.channels", BoolTrue),
        F::new("DISCORD_ACTIONS_VOICE_STATUS", "actions.voiceStatus", BoolTrue),
        F::new("DISCORD_ACTIONS_EVENTS", "actions.events", BoolTrue),
        F::new("DISCORD_ACTIONS_ROLES", "actions.roles", BoolFalse),
        F::new("DISCORD_ACTIONS_MODERATION", "actions.moderation", BoolFalse),
        F::new("DISCORD_TEXT_CHUNK_LIMIT", "textChunkLimit", Int),
        F::new("DISCORD_MAX_LINES_PER_MESSAGE", "maxLinesPerMessage", Int),
        F::new("DISCORD_MEDIA_MAX_MB", "mediaMaxMb", Int),
        F::new("DISCORD_HISTORY_LIMIT", "historyLimit", Int),
        F::new("DISCORD_DM_HISTORY_LIMIT", "dmHistoryLimit", Int),
        F::new("DISCORD_DM_ALLOW_FROM", "dm.allowFrom", Csv),
    ],
};

pub const SLACK: ChannelSchema = ChannelSchema {
    key: "slack",
    gate: Gate::AllPresent(&["SLACK_BOT_TOKEN", "SLACK_APP_TOKEN"]),
    token_fields: &["botToken", "appToken"],
    merge: true,
    fields: &[
        F::new("SLACK_USER_TOKEN", "userToken", Str),
        F::new("SLACK_SIGNING_SECRET", "signingSecret", Str),
        F::new("SLACK_MODE", "mode", Str),
        F::new("SLACK_WEBHOOK_PATH", "webhookPath", Str),
        F::new("SLACK_DM_POLICY", "dm.policy", Str),
        F::new("SLACK_GROUP_POLICY", "groupPolicy", Str),
        F::new("SLACK_REPLY_TO_MODE", "replyToMode", Str),
        F::new("SLACK_REACTION_NOTIFICATIONS", "reactionNotifications", Str),
        F::new("SLACK_CHUNK_MODE", "chunkMode", Str),
        F::new("SLACK_MESSAGE_PREFIX", "messagePrefix", Str),
        F::new("SLACK_ALLOW_BOTS", "allowBots", BoolFalse),
        F::new("SLACK_ACTIONS_REACTIONS", "actions.reactions", BoolTrue),
        F::new("SLACK_ACTIONS_MESSAGES", "actions.messages", BoolTrue),
        F::new("SLACK_ACTIONS_PINS", "actions.pins", BoolTrue),
        F::new("SLACK_ACTIONS_MEMBER_INFO", "actions.memberInfo", BoolTrue),
        F::new("SLACK_ACTIONS_EMOJI_LIST", "actions.emojiList", BoolTrue),
        F::new("SLACK_HISTORY_LIMIT", "historyLimit", Int),
        F::new("SLACK_TEXT_CHUNK_LIMIT", "textChunkLimit", Int),
        F::new("SLACK_MEDIA_MAX_MB", "mediaMaxMb", Int),
        F::new("SLACK_DM_ALLOW_FROM", "dm.allowFrom", Csv),
    ],
};

pub const WHATSAPP: ChannelSchema = ChannelSchema {
    key: "whatsapp",
    gate: Gate::Flag("WHATSAPP_ENABLED"),
    token_fields: &[],
    merge: false,
    fields: &[
        F::new("WHATSAPP_DM_POLICY", "dmPolicy", Str),
        F::new("WHATSAPP_GROUP_POLICY", "groupPolicy", Str),
        F::new("WHATSAPP_MESSAGE_PREFIX", "messagePrefix", Str),
        F::new("WHATSAPP_SELF_CHAT_MODE", "selfChatMode", BoolFalse),
        F::new("WHATSAPP_SEND_READ_RECEIPTS", "sendReadReceipts", BoolTrue),
        F::new("WHATSAPP_ACTIONS_REACTIONS", "actions.reactions", BoolTrue),
        F::new("WHATSAPP_MEDIA_MAX_MB", "mediaMaxMb", Int),
        F::new("WHATSAPP_HISTORY_LIMIT", "historyLimit", Int),
        F::new("WHATSAPP_DM_HISTORY_LIMIT", "dmHistoryLimit", Int),
        F::new("WHATSAPP_ALLOW_FROM", "allowFrom", Csv),
        F::new("WHATSAPP_GROUP_ALLOW_FROM", "groupAllowFrom", Csv),
        F::new("WHATSAPP_ACK_REACTION_EMOJI", "ackReaction.emoji", Str),
        F::new("WHATSAPP_ACK_REACTION_DIRECT", "ackReaction.direct", BoolTrue),
        F::new("WHATSAPP_ACK_REACTION_GROUP", "ackReaction.group", Str),
    ],
};
