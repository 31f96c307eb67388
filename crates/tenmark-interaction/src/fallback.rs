//! Deterministic fallback content.
//!
//! Everything here is locally defined and total: whatever the provider does,
//! these tables can stand in for it. Caption templates are keyed by
//! personality, image references by client type.

use crate::{CampaignSubmission, CaptionBrief};
use tenmark_core::{ClientType, ImageSource, Personality};

/// Emoji set used in templated captions. `None` covers briefs whose client
/// type is not one of the standard three.
pub fn emoji_set(client_type: Option<ClientType>) -> [&'static str; 3] {
    match client_type {
        Some(ClientType::Fashion) => ["👗", "✨", "💃"],
        Some(ClientType::FoodAndBeverage) => ["🍜", "🔥", "😋"],
        Some(ClientType::Barbershop) => ["💈", "✂️", "👔"],
        None => ["🎯", "🚀", "💯"],
    }
}

/// Synthesizes the templated caption from the literal campaign fields.
/// Always non-empty.
pub fn fallback_caption(brief: &CaptionBrief) -> String {
    let [first, second, third] = emoji_set(Some(brief.client_type));

    match brief.personality {
        Personality::Appreciative => format!(
            "{first} Tingkatkan gaya Anda dengan {headline} kami! {second}\n\n\
             {usp} Jangan lewatkan kesempatan untuk tampil dan merasa terbaik. {cta} {third}",
            headline = brief.headline,
            usp = brief.usp,
            cta = brief.cta,
        ),
        Personality::Outspoken => format!(
            "{first} Memperkenalkan: {headline} yang akan meledakkan lidah Anda! {second}\n\n\
             {usp} Siap untuk ledakan rasa? {cta} {third}",
            headline = brief.headline,
            usp = brief.usp,
            cta = brief.cta,
        ),
        Personality::Technical => format!(
            "{first} {headline} - untuk mereka yang menghargai presisi dan gaya. {second}\n\n\
             {usp} Tampil tajam belum pernah semudah ini. {cta} {third}",
            headline = brief.headline,
            usp = brief.usp,
            cta = brief.cta,
        ),
    }
}

/// Curated stock photo substituted when a generation call fails.
pub fn fallback_image(client_type: ClientType) -> ImageSource {
    let url = match client_type {
        ClientType::Fashion => {
            "https://images.unsplash.com/photo-1445205170230-053b83016050?q=80&w=1000&auto=format&fit=crop"
        }
        ClientType::FoodAndBeverage => {
            "https://images.unsplash.com/photo-1565299507177-b0ac66763828?q=80&w=1000&auto=format&fit=crop"
        }
        ClientType::Barbershop => {
            "https://images.unsplash.com/photo-1503951914875-452162b0f3f1?q=80&w=1000&auto=format&fit=crop"
        }
    };
    ImageSource::Url(url.to_string())
}

/// Generic curated stock photo for campaigns without a known client type.
pub fn generic_fallback_image() -> ImageSource {
    ImageSource::Url(
        "https://images.unsplash.com/photo-1557200134-90327ee9fafa?q=80&w=1000&auto=format&fit=crop"
            .to_string(),
    )
}

/// Bundled placeholder used when the provider is unreachable before any
/// call is attempted (no credential configured).
pub fn local_placeholder(client_type: ClientType) -> ImageSource {
    let path = match client_type {
        ClientType::Fashion => "placeholders/fashion.jpg",
        ClientType::FoodAndBeverage => "placeholders/food.jpg",
        ClientType::Barbershop => "placeholders/barbershop.jpg",
    };
    ImageSource::Placeholder(path.to_string())
}

/// Generic feedback paragraph interpolating the submitted content, used when
/// the client has no pre-written last-resort paragraph.
pub fn generic_fallback_feedback(submission: &CampaignSubmission) -> String {
    format!(
        "Sebagai klien Anda, saya terkesan dengan kampanye {client_type} Anda! \n\n\
         Strategi pemasaran Anda secara efektif menargetkan audiens kami dengan pesan yang \
         menarik. Copywriting-nya menarik dan selaras dengan suara brand kami. Headline Anda \
         \"{headline}\" menarik perhatian dan mudah diingat. \n\n\
         Elemen visual yang Anda pilih melengkapi identitas brand kami dan akan menonjol di \
         media sosial. Call-to-action \"{cta}\" jelas dan mendorong keterlibatan. Caption Anda \
         dibuat dengan baik dengan nada dan kepribadian yang tepat untuk audiens kami.\n\n\
         Secara keseluruhan, ini adalah pekerjaan yang sangat baik yang akan membantu kami \
         mencapai tujuan pemasaran. Elemen kampanye bekerja sama secara kohesif untuk \
         menciptakan kehadiran media sosial yang kuat.",
        client_type = submission.client_type,
        headline = submission.headline,
        cta = submission.cta,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brief(personality: Personality, client_type: ClientType) -> CaptionBrief {
        CaptionBrief {
            headline: "Pedas Menggila!".to_string(),
            usp: "Level pedas custom".to_string(),
            cta: "Pesan sekarang".to_string(),
            client_type,
            client_name: "GoodFood".to_string(),
            personality,
        }
    }

    #[test]
    fn test_fallback_caption_embeds_literal_fields() {
        let caption = fallback_caption(&brief(
            Personality::Outspoken,
            ClientType::FoodAndBeverage,
        ));
        assert!(caption.contains("Pedas Menggila!"));
        assert!(caption.contains("Level pedas custom"));
        assert!(caption.contains("Pesan sekarang"));
        assert!(caption.contains("🍜"));
    }

    #[test]
    fn test_fallback_caption_varies_by_personality() {
        let warm = fallback_caption(&brief(Personality::Appreciative, ClientType::Fashion));
        let bold = fallback_caption(&brief(Personality::Outspoken, ClientType::FoodAndBeverage));
        let precise = fallback_caption(&brief(Personality::Technical, ClientType::Barbershop));
        assert!(warm.contains("Tingkatkan gaya Anda"));
        assert!(bold.contains("meledakkan lidah"));
        assert!(precise.contains("menghargai presisi"));
    }

    #[test]
    fn test_fallback_images_are_type_keyed() {
        for client_type in [
            ClientType::Fashion,
            ClientType::FoodAndBeverage,
            ClientType::Barbershop,
        ] {
            match fallback_image(client_type) {
                ImageSource::Url(url) => assert!(url.starts_with("https://")),
                other => panic!("expected URL fallback, got {other:?}"),
            }
        }
        assert_ne!(
            fallback_image(ClientType::Fashion),
            fallback_image(ClientType::Barbershop)
        );
    }

    #[test]
    fn test_generic_fallbacks() {
        assert_eq!(emoji_set(None), ["🎯", "🚀", "💯"]);
        match generic_fallback_image() {
            ImageSource::Url(url) => assert!(url.starts_with("https://")),
            other => panic!("expected URL fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_local_placeholders() {
        assert_eq!(
            local_placeholder(ClientType::FoodAndBeverage).as_str(),
            "placeholders/food.jpg"
        );
    }

    #[test]
    fn test_generic_feedback_quotes_submission() {
        let submission = CampaignSubmission {
            client_name: "Warung Baru".to_string(),
            client_type: ClientType::FoodAndBeverage,
            personality: Personality::Outspoken,
            headline: "Gurih Maksimal".to_string(),
            usp: "Resep rahasia".to_string(),
            cta: "Coba hari ini".to_string(),
            caption_text: "caption".to_string(),
            elapsed_time: 100,
        };
        let feedback = generic_fallback_feedback(&submission);
        assert!(feedback.contains("kampanye F&B Anda"));
        assert!(feedback.contains("\"Gurih Maksimal\""));
        assert!(feedback.contains("\"Coba hari ini\""));
    }
}
