//! Client profiles and the static client registry.
//!
//! The three built-in clients (briefs, descriptions, owner names and the
//! last-resort feedback paragraphs) are configuration, not logic: the
//! registry is injected wherever client content is needed and can be
//! overridden from a TOML file.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum_macros::{Display, EnumIter};

/// Business category of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ClientType {
    #[strum(serialize = "Fashion")]
    Fashion,
    #[serde(rename = "F&B")]
    #[strum(serialize = "F&B")]
    FoodAndBeverage,
    #[strum(serialize = "Barbershop")]
    Barbershop,
}

/// Tonal profile a client expects in copy and in feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Personality {
    /// Warm, elegant, encouraging.
    Appreciative,
    /// Bold, direct, playful.
    Outspoken,
    /// Precise, structured, professional.
    Technical,
}

/// A fictional client the user works for during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Business name, e.g. "GoodFood".
    pub name: String,
    pub client_type: ClientType,
    pub personality: Personality,
    /// The owner's first name, used as the feedback voice.
    pub owner_name: String,
    /// Short description shown on the selection screen.
    pub description: String,
    /// The full client brief shown before the timed phase.
    pub brief: String,
    /// Pre-written feedback paragraph, used only as last-resort fallback.
    pub fallback_feedback: String,
}

/// Owner name used when a client is not one of the built-in three.
pub const DEFAULT_OWNER_NAME: &str = "Alex";

/// Generic brief shown for clients without a pre-written one.
pub fn generic_brief(client_type: ClientType) -> String {
    format!(
        "Saya membutuhkan postingan media sosial yang menarik untuk bisnis {client_type} saya. \
         Mohon buat sesuatu yang sesuai dengan identitas brand kami dan beresonansi dengan \
         target audiens kami."
    )
}

/// TOML root for a registry override file (`[[client]]` tables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RegistryRoot {
    #[serde(rename = "client", default)]
    clients: Vec<ClientProfile>,
}

/// Lookup table of client profiles.
#[derive(Debug, Clone)]
pub struct ClientRegistry {
    clients: Vec<ClientProfile>,
}

impl ClientRegistry {
    /// The built-in registry with the three standard clients.
    pub fn builtin() -> Self {
        Self {
            clients: vec![
                ClientProfile {
                    name: "LoveSummer".to_string(),
                    client_type: ClientType::Fashion,
                    personality: Personality::Appreciative,
                    owner_name: "Rina".to_string(),
                    description: "Brand fashion untuk wanita yang suka merasa stylish dan empowered"
                        .to_string(),
                    brief: "Hai! Saya menjalankan brand fashion lokal untuk wanita yang suka merasa \
                            stylish dan empowered. Bisakah Anda membuat postingan yang mempromosikan \
                            koleksi musim panas baru kami? Kami ingin terkesan elegan, menyenangkan, \
                            dan modern."
                        .to_string(),
                    fallback_feedback: LOVESUMMER_FEEDBACK.to_string(),
                },
                ClientProfile {
                    name: "GoodFood".to_string(),
                    client_type: ClientType::FoodAndBeverage,
                    personality: Personality::Outspoken,
                    owner_name: "Budi".to_string(),
                    description:
                        "Bisnis makanan & minuman yang berani dan inovatif dengan fokus pada cita rasa"
                            .to_string(),
                    brief: "Yo! Saya meluncurkan ramen pedas baru dan saya ingin viral. Buat sesuatu \
                            yang berani dan menggugah selera. Jangan ragu - captionnya harus keren. \
                            Ini untuk para pecinta rasa."
                        .to_string(),
                    fallback_feedback: GOODFOOD_FEEDBACK.to_string(),
                },
                ClientProfile {
                    name: "Gentleman Palace".to_string(),
                    client_type: ClientType::Barbershop,
                    personality: Personality::Technical,
                    owner_name: "Brian".to_string(),
                    description: "Barbershop minimalis yang fokus pada presisi dan grooming yang bersih"
                        .to_string(),
                    brief: "Halo. Saya memiliki barbershop minimalis yang fokus pada presisi dan \
                            grooming yang bersih. Saya membutuhkan postingan media sosial untuk promo \
                            \"Fresh Fade Friday\" kami. Buatlah menarik, jelas, dan profesional."
                        .to_string(),
                    fallback_feedback: GENTLEMAN_PALACE_FEEDBACK.to_string(),
                },
            ],
        }
    }

    /// Parses a registry from TOML content. An empty file yields an empty
    /// registry; callers that want the defaults use [`ClientRegistry::builtin`].
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let root: RegistryRoot = toml::from_str(content)?;
        Ok(Self {
            clients: root.clients,
        })
    }

    /// Loads a registry override file, e.g. `~/.config/tenmark/clients.toml`.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The registry from `~/.config/tenmark/clients.toml` when one exists
    /// and parses to at least one client, otherwise the built-ins.
    pub fn load_or_builtin() -> Self {
        let Some(home) = dirs::home_dir() else {
            return Self::builtin();
        };
        let path = home.join(".config").join("tenmark").join("clients.toml");
        if !path.exists() {
            return Self::builtin();
        }
        match Self::load_from_path(&path) {
            Ok(registry) if !registry.clients.is_empty() => registry,
            _ => Self::builtin(),
        }
    }

    pub fn all(&self) -> &[ClientProfile] {
        &self.clients
    }

    pub fn get(&self, name: &str) -> Option<&ClientProfile> {
        self.clients.iter().find(|c| c.name == name)
    }

    /// The brief for a client, falling back to the generic template for
    /// names not in the registry.
    pub fn brief_for(&self, name: &str, client_type: ClientType) -> String {
        self.get(name)
            .map(|c| c.brief.clone())
            .unwrap_or_else(|| generic_brief(client_type))
    }

    /// Owner first name for a client, `Alex` for unknown names.
    pub fn owner_name_for(&self, name: &str) -> String {
        self.get(name)
            .map(|c| c.owner_name.clone())
            .unwrap_or_else(|| DEFAULT_OWNER_NAME.to_string())
    }

    /// The last-resort feedback paragraph, if the client has one.
    pub fn fallback_feedback_for(&self, name: &str) -> Option<String> {
        self.get(name).map(|c| c.fallback_feedback.clone())
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

const LOVESUMMER_FEEDBACK: &str = "Hai! Rina dari LoveSummer di sini. Saya sangat terkesan dengan pekerjaan Anda! Strategi pemasaran secara keseluruhan sangat sesuai dengan identitas brand fashion kami - elegan, memberdayakan, dan modern. Copywriting Anda memiliki nada yang hangat dan canggih yang disukai audiens kami, dan headline-nya mudah diingat dan berdampak. Elemen visual dengan indah melengkapi warna dan estetika brand kami, menciptakan postingan yang layak untuk Instagram dan akan menonjol di feed. Call-to-action-nya jelas dan menarik, mendorong keterlibatan langsung. Caption Anda mencapai keseimbangan sempurna antara informatif dan percakapan, dengan jumlah emoji yang tepat untuk meningkatkan keterlibatan tanpa terlihat tidak profesional. Jika saya bisa menyarankan satu perbaikan, mungkin menambahkan referensi musiman yang halus akan membuatnya lebih tepat waktu dan relevan. Secara keseluruhan, ini adalah pekerjaan yang sangat baik yang menangkap esensi LoveSummer!";

const GOODFOOD_FEEDBACK: &str = "Yo! Budi dari GoodFood di sini. Kampanye ini benar-benar KEREN! Dari sudut pandang pemasaran, Anda benar-benar menangkap identitas brand kami yang berani dan langsung. Copywriting memiliki nuansa kasual dan energik yang berbicara langsung kepada audiens kami yang tergila-gila dengan makanan. Headline Anda kuat dan mudah diingat - persis yang kami butuhkan untuk menonjol di media sosial. Deskripsi visual yang Anda buat menggugah selera dan menarik perhatian - warna dan detail penyajian makanan pasti akan membuat orang menginginkan ramen pedas kami! CTA-nya langsung dan menciptakan urgensi, yang persis yang kami inginkan. Caption Anda memiliki sikap dan bahasa gaul yang tepat yang beresonansi dengan demografis kami yang lebih muda. Permainan emoji juga tepat! Satu hal kecil yang perlu dipertimbangkan: mungkin tambahkan sesuatu tentang tingkat kepedasan unik untuk benar-benar menyoroti apa yang membuat ramen kami berbeda. Tapi jujur, ini persis jenis konten yang akan membuat produk kami viral. Respect besar karena memahami vibe GoodFood dengan sempurna!";

const GENTLEMAN_PALACE_FEEDBACK: &str = "Halo. Brian dari Gentleman Palace di sini. Saya telah menganalisis kampanye pemasaran Anda dengan presisi, dan saya senang melaporkan bahwa itu memenuhi standar kualitas kami. Dari perspektif strategis, Anda telah berhasil menyelaraskan dengan identitas brand barbershop minimalis kami melalui elemen desain yang bersih dan presentasi profesional. Copywriting menunjukkan keahlian teknis dan pesan terstruktur yang diharapkan klien kami. Headline Anda ringkas dan informatif, dengan jelas mengkomunikasikan promosi Fresh Fade Friday kami tanpa hiasan yang tidak perlu. Elemen visual yang Anda pilih mempertahankan palet monokromatik kami dan menampilkan presisi layanan grooming kami. Call-to-action tepat sasaran dan memberikan langkah selanjutnya yang jelas untuk pemesanan. Caption Anda mempertahankan keseimbangan profesionalisme yang tepat sambil tetap menarik. Saya sangat menghargai tidak adanya emoji berlebihan, karena ini sesuai dengan pedoman brand kami. Satu rekomendasi adalah menyertakan terminologi teknis yang lebih spesifik terkait dengan potongan rambut unggulan kami untuk lebih memperkuat keahlian. Secara keseluruhan, kampanye ini menunjukkan perhatian terhadap detail dan kualitas profesional yang mewakili Gentleman Palace.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_three_clients() {
        let registry = ClientRegistry::builtin();
        let names: Vec<&str> = registry.all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["LoveSummer", "GoodFood", "Gentleman Palace"]);
    }

    #[test]
    fn test_owner_names() {
        let registry = ClientRegistry::builtin();
        assert_eq!(registry.owner_name_for("LoveSummer"), "Rina");
        assert_eq!(registry.owner_name_for("GoodFood"), "Budi");
        assert_eq!(registry.owner_name_for("Gentleman Palace"), "Brian");
        assert_eq!(registry.owner_name_for("Someone Else"), "Alex");
    }

    #[test]
    fn test_brief_falls_back_to_generic() {
        let registry = ClientRegistry::builtin();
        let brief = registry.brief_for("Unknown Cafe", ClientType::FoodAndBeverage);
        assert!(brief.contains("bisnis F&B saya"));
    }

    #[test]
    fn test_client_type_display() {
        assert_eq!(ClientType::Fashion.to_string(), "Fashion");
        assert_eq!(ClientType::FoodAndBeverage.to_string(), "F&B");
        assert_eq!(ClientType::Barbershop.to_string(), "Barbershop");
    }

    #[test]
    fn test_from_toml_str() {
        let toml = r#"
            [[client]]
            name = "TestBrand"
            client_type = "Fashion"
            personality = "Appreciative"
            owner_name = "Tia"
            description = "test"
            brief = "test brief"
            fallback_feedback = "test feedback"
        "#;
        let registry = ClientRegistry::from_toml_str(toml).unwrap();
        assert_eq!(registry.all().len(), 1);
        assert_eq!(registry.get("TestBrand").unwrap().owner_name, "Tia");
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.toml");
        std::fs::write(
            &path,
            r#"
                [[client]]
                name = "Kopi Pagi"
                client_type = "F&B"
                personality = "Outspoken"
                owner_name = "Dewi"
                description = "kedai kopi"
                brief = "promosikan menu baru kami"
                fallback_feedback = "kerja bagus"
            "#,
        )
        .unwrap();

        let registry = ClientRegistry::load_from_path(&path).unwrap();
        let client = registry.get("Kopi Pagi").unwrap();
        assert_eq!(client.client_type, ClientType::FoodAndBeverage);
        assert_eq!(client.owner_name, "Dewi");
    }

    #[test]
    fn test_load_from_missing_path_is_io_error() {
        let err = ClientRegistry::load_from_path(Path::new("/nonexistent/clients.toml"))
            .unwrap_err();
        assert!(matches!(err, crate::error::TenmarkError::Io { .. }));
    }

    #[test]
    fn test_unknown_client_has_no_static_feedback() {
        let registry = ClientRegistry::builtin();
        assert!(registry.fallback_feedback_for("Unknown Cafe").is_none());
        assert!(registry.fallback_feedback_for("GoodFood").is_some());
    }
}
