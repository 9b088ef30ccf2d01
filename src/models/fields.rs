//! Field and expansion selectors sent as list query parameters.

/// Value as it appears on the wire
pub trait WireName {
    fn wire_name(&self) -> &'static str;
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl WireName for $name {
            fn wire_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.wire_name())
            }
        }
    };
}

wire_enum!(
    /// `tweet.fields`
    TweetField {
        Attachments => "attachments",
        AuthorId => "author_id",
        ContextAnnotations => "context_annotations",
        ConversationId => "conversation_id",
        CreatedAt => "created_at",
        Entities => "entities",
        Geo => "geo",
        Id => "id",
        InReplyToUserId => "in_reply_to_user_id",
        Lang => "lang",
        NonPublicMetrics => "non_public_metrics",
        PublicMetrics => "public_metrics",
        OrganicMetrics => "organic_metrics",
        PromotedMetrics => "promoted_metrics",
        PossiblySensitive => "possibly_sensitive",
        ReferencedTweets => "referenced_tweets",
        ReplySettings => "reply_settings",
        Source => "source",
        Text => "text",
        Withheld => "withheld",
    }
);

wire_enum!(
    /// `user.fields`
    UserField {
        CreatedAt => "created_at",
        Description => "description",
        Entities => "entities",
        Id => "id",
        Location => "location",
        Name => "name",
        PinnedTweetId => "pinned_tweet_id",
        ProfileImageUrl => "profile_image_url",
        Protected => "protected",
        PublicMetrics => "public_metrics",
        Url => "url",
        Username => "username",
        Verified => "verified",
        Withheld => "withheld",
    }
);

wire_enum!(
    /// `media.fields`
    MediaField {
        DurationMs => "duration_ms",
        Height => "height",
        MediaKey => "media_key",
        PreviewImageUrl => "preview_image_url",
        Type => "type",
        Url => "url",
        Width => "width",
        PublicMetrics => "public_metrics",
        NonPublicMetrics => "non_public_metrics",
        OrganicMetrics => "organic_metrics",
        PromotedMetrics => "promoted_metrics",
    }
);

wire_enum!(
    /// `place.fields`
    PlaceField {
        ContainedWithin => "contained_within",
        Country => "country",
        CountryCode => "country_code",
        FullName => "full_name",
        Geo => "geo",
        Id => "id",
        Name => "name",
        PlaceType => "place_type",
    }
);

wire_enum!(
    /// `poll.fields`
    PollField {
        DurationMinutes => "duration_minutes",
        EndDatetime => "end_datetime",
        Id => "id",
        Options => "options",
        VotingStatus => "voting_status",
    }
);

wire_enum!(
    /// `expansions` on tweet endpoints
    TweetExpansion {
        AttachmentsPollIds => "attachments.poll_ids",
        AttachmentsMediaKeys => "attachments.media_keys",
        AuthorId => "author_id",
        EntitiesMentionsUsername => "entities.mentions.username",
        GeoPlaceId => "geo.place_id",
        InReplyToUserId => "in_reply_to_user_id",
        ReferencedTweetsId => "referenced_tweets.id",
        ReferencedTweetsIdAuthorId => "referenced_tweets.id.author_id",
    }
);

wire_enum!(
    /// `expansions` on user endpoints
    UserExpansion {
        PinnedTweetId => "pinned_tweet_id",
    }
);

wire_enum!(
    /// `exclude` on the user timeline
    Exclude {
        Retweets => "retweets",
        Replies => "replies",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(TweetField::Lang.wire_name(), "lang");
        assert_eq!(
            TweetExpansion::ReferencedTweetsIdAuthorId.to_string(),
            "referenced_tweets.id.author_id"
        );
        assert_eq!(UserExpansion::PinnedTweetId.wire_name(), "pinned_tweet_id");
        assert_eq!(Exclude::Replies.wire_name(), "replies");
    }
}
