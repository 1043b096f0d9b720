//! Assistant dialogue handler: grounds the completion call in the live
//! catalog, bounds the conversation, and attaches product images when the
//! customer asks to see one.

use std::sync::Arc;

use crate::catalog::CatalogService;
use crate::context::CatalogContext;
use crate::ports::CompletionClient;
use crate::types::{ChatReply, ChatRole, ChatTurn, Product, ProductImage};

/// Conversation turns kept when calling the completion service.
pub const MAX_HISTORY_TURNS: usize = 6;
/// Image suggestions attached to a single reply.
pub const MAX_IMAGE_MATCHES: usize = 3;

/// Served whenever any part of the reply pipeline fails. Bilingual so it
/// works regardless of which language the customer wrote in.
pub const FALLBACK_REPLY: &str = "Samahani, siwezi kujibu kwa sasa. Tafadhali piga simu +255 712 555 001 kwa msaada wa haraka. / Sorry, I cannot reply right now. Please call +255 712 555 001 for quick help.";

/// Words that signal the customer wants to see product photos.
const IMAGE_KEYWORDS: [&str; 6] = [
    "picha",
    "nionyeshe",
    "onyesha",
    "picture",
    "photo",
    "image",
];

pub struct DialogueHandler {
    catalog: Arc<CatalogService>,
    completion: Arc<dyn CompletionClient>,
}

impl DialogueHandler {
    pub fn new(catalog: Arc<CatalogService>, completion: Arc<dyn CompletionClient>) -> Self {
        Self { catalog, completion }
    }

    /// Answer the customer. Never fails: every error in the pipeline
    /// degrades to [`FALLBACK_REPLY`], and the image list is computed
    /// independently of whether the completion call succeeded.
    pub async fn reply(&self, history: &[ChatTurn]) -> ChatReply {
        let products = match self.catalog.list_products().await {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(
                    target: "duka.assistant",
                    error = %e,
                    "catalog read failed, serving fallback"
                );
                return ChatReply {
                    reply: FALLBACK_REPLY.to_string(),
                    images: Vec::new(),
                };
            }
        };

        let images = latest_user_message(history)
            .map(|message| match_images(message, &products))
            .unwrap_or_default();

        // The context is rebuilt from live stock on every call.
        let context = CatalogContext::build(&products);
        let system = build_system_prompt(&context);
        let recent = truncate_history(history);

        let reply = match self.completion.complete(&system, recent).await {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!(
                    target: "duka.assistant",
                    "completion returned no text, serving fallback"
                );
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                tracing::warn!(
                    target: "duka.assistant",
                    error = %e,
                    "completion failed, serving fallback"
                );
                FALLBACK_REPLY.to_string()
            }
        };

        ChatReply { reply, images }
    }
}

/// Last [`MAX_HISTORY_TURNS`] turns, original order preserved.
fn truncate_history(history: &[ChatTurn]) -> &[ChatTurn] {
    let start = history.len().saturating_sub(MAX_HISTORY_TURNS);
    &history[start..]
}

fn latest_user_message(history: &[ChatTurn]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|turn| turn.role == ChatRole::User)
        .map(|turn| turn.content.as_str())
}

/// Image-attachment policy.
///
/// No intent keyword in the message means no images. With a keyword,
/// candidates are products carrying an image whose name's first word is a
/// case-insensitive substring of the message; when nothing matches by
/// name, every product carrying an image is a candidate. Capped to the
/// first [`MAX_IMAGE_MATCHES`].
fn match_images(message: &str, products: &[Product]) -> Vec<ProductImage> {
    let message = message.to_lowercase();
    if !IMAGE_KEYWORDS.iter().any(|kw| message.contains(kw)) {
        return Vec::new();
    }

    let mut candidates: Vec<&Product> = products
        .iter()
        .filter(|p| {
            p.image_url.is_some()
                && p.name
                    .split_whitespace()
                    .next()
                    .is_some_and(|first| message.contains(&first.to_lowercase()))
        })
        .collect();

    if candidates.is_empty() {
        candidates = products.iter().filter(|p| p.image_url.is_some()).collect();
    }

    candidates
        .into_iter()
        .take(MAX_IMAGE_MATCHES)
        .map(|p| ProductImage {
            url: p.image_url.clone().unwrap_or_default(),
            name: p.name.clone(),
            price: p.price,
        })
        .collect()
}

fn build_system_prompt(context: &CatalogContext) -> String {
    format!(
        r#"Wewe ni msaidizi wa mauzo wa Duka Bora Electronics, duka la vifaa vya kielektroniki lililopo Kariakoo, Dar es Salaam, Tanzania.

Taarifa za duka / Store facts:
- Saa za kazi: Jumatatu mpaka Jumamosi 08:00-20:00, Jumapili 10:00-16:00.
- Delivery: siku hiyo hiyo ndani ya Dar es Salaam, siku 1-3 kwa mikoani.
- Malipo: mteja analipa baada ya mzigo kufika (pay after delivery). Hakuna malipo ya awali.

Bidhaa zilizopo sasa (in stock):
{in_stock}

Bidhaa zilizoisha (out of stock):
{out_of_stock}

Sheria za majibu / Reply rules:
1. Jibu kwa LUGHA ILE ILE aliyotumia mteja kwenye ujumbe wake wa mwisho: Kiswahili tupu au Kiingereza tupu. USICHANGANYE lugha mbili kwenye jibu moja.
2. Jibu fupi, mistari minne au chini yake.
3. Ukiorodhesha bidhaa, mstari mmoja kwa bidhaa: • jina - TZS bei
4. Pendekeza bidhaa zilizo kwenye orodha ya "zilizopo sasa" TU. Usibuni bidhaa, bei, wala ofa.
5. Kama bidhaa imeisha, mwambie mteja imeisha na pendekeza mbadala kutoka kwenye orodha ya zilizopo.
"#,
        in_stock = context.in_stock,
        out_of_stock = context.out_of_stock
    )
}
