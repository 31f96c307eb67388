//! Prompt construction for the three generation operations.
//!
//! Prompts are plain `format!` strings. The image prompt bakes the square
//! format and edge-padding requirements into the text because the provider
//! honors composition instructions more reliably than request parameters.

use crate::{CampaignSubmission, CaptionBrief};
use tenmark_core::{ClientType, Personality};

/// Client-type-specific visual guidance interpolated into the image prompt.
fn visual_guidance(client_type: ClientType) -> &'static str {
    match client_type {
        ClientType::Fashion => {
            "Include stylish clothing, modern fashion elements, and an elegant aesthetic. \
             The image should convey sophistication and trendy appeal."
        }
        ClientType::FoodAndBeverage => {
            "Include appetizing food imagery, vibrant colors, and mouth-watering presentation. \
             The image should make viewers hungry and excited about the food."
        }
        ClientType::Barbershop => {
            "Include clean, precise grooming imagery, modern barbershop elements, and a \
             professional aesthetic. The image should convey precision and style."
        }
    }
}

/// Tonal guidance derived from the client personality.
fn personality_guidance(personality: Personality) -> &'static str {
    match personality {
        Personality::Appreciative => {
            "The tone should be warm, elegant, and encouraging. Use sophisticated language \
             that appeals to fashion-conscious customers."
        }
        Personality::Outspoken => {
            "The tone should be bold, direct, and playful. Use casual, energetic language \
             with some slang that appeals to food enthusiasts."
        }
        Personality::Technical => {
            "The tone should be precise, structured, and professional. Use clean, clear \
             language that appeals to customers who value quality grooming."
        }
    }
}

/// The normalized poster prompt: campaign fields, client-type guidance, and
/// the fixed square/padding specifications.
pub fn image_prompt(
    headline: &str,
    usp: &str,
    cta: &str,
    visual_description: &str,
    client_type: ClientType,
) -> String {
    format!(
        "Create a professional Instagram-style poster for a {client_type} brand with the following details:\n\
         \n\
         Headline: \"{headline}\"\n\
         Unique Selling Proposition: \"{usp}\"\n\
         Call to Action: \"{cta}\"\n\
         Visual Style: {visual_description}\n\
         \n\
         {guidance}\n\
         \n\
         IMPORTANT SPECIFICATIONS:\n\
         - The image should be in square format with dimensions 1024x1024 pixels\n\
         - Ensure all text and visual elements have sufficient padding from the edges (at least 100 pixels)\n\
         - Make sure no important elements are cut off or too close to the borders\n\
         \n\
         The image should be vibrant, visually striking, and suitable for social media marketing. \
         The composition should be clean with balanced elements and professional typography. \
         Create a realistic, high-quality image that would look authentic on Instagram.",
        guidance = visual_guidance(client_type),
    )
}

/// The caption-suggestion prompt with persona guidance.
pub fn caption_prompt(brief: &CaptionBrief) -> String {
    format!(
        "You are a social media copywriter. Write a catchy, engaging Instagram caption for a \
         brand campaign in Bahasa Indonesia.\n\
         \n\
         Inputs:\n\
         - Headline: {headline}\n\
         - USP: {usp}\n\
         - CTA: {cta}\n\
         - Client Type: {client_type}\n\
         - Client Name: {client_name}\n\
         - Client Personality: {personality}\n\
         \n\
         {guidance}\n\
         \n\
         Output a caption in Bahasa Indonesia in 1-2 short paragraphs with 2-3 emojis that \
         perfectly matches the client's personality and business type.",
        headline = brief.headline,
        usp = brief.usp,
        cta = brief.cta,
        client_type = brief.client_type,
        client_name = brief.client_name,
        personality = brief.personality,
        guidance = personality_guidance(brief.personality),
    )
}

/// The structured feedback prompt. The response must embed a
/// `Feedback: "..."` / `Score: NN` pair for the parser to extract.
pub fn feedback_prompt(submission: &CampaignSubmission, owner_name: &str) -> String {
    // Quote only the head of the caption; full captions can be long.
    let caption_head: String = submission.caption_text.chars().take(50).collect();

    format!(
        "You are the client reviewing an Instagram marketing post for your business. Your name is \
         {owner_name} and you own {client_name}. Based on the following inputs, generate a \
         comprehensive, detailed feedback message IN BAHASA INDONESIA that SPECIFICALLY comments on \
         the exact content submitted and give a quality score (0-100).\n\
         \n\
         Inputs:\n\
         - Your Name: {owner_name}\n\
         - Your Business: {client_name} ({client_type})\n\
         - Your Personality: {personality}\n\
         - Headline Submitted: \"{headline}\"\n\
         - USP Submitted: \"{usp}\"\n\
         - CTA Submitted: \"{cta}\"\n\
         - Caption Submitted: \"{caption}\"\n\
         - Time Taken (in seconds): {elapsed}\n\
         \n\
         Client Details:\n\
         - Rina owns LoveSummer: A warm, encouraging, and sophisticated fashion brand for women who \
         love feeling stylish and empowered\n\
         - Budi owns GoodFood: A direct, playful, and bold F&B business launching a new spicy ramen \
         targeting flavor lovers\n\
         - Brian owns Gentleman Palace: A technical, structured, and minimalist barbershop focused \
         on precision and clean grooming\n\
         \n\
         Your feedback MUST:\n\
         1. Start by introducing yourself by your first name (e.g., \"Hey there, {owner_name} from \
         {client_name} here!\")\n\
         2. DIRECTLY QUOTE and comment on the specific headline, USP, CTA, and caption submitted\n\
         3. Mention specific elements of the visual/image that you liked or would improve\n\
         4. Maintain your brand's voice throughout\n\
         \n\
         Analyze each of these marketing aspects in detail, ALWAYS referring to the specific content \
         submitted:\n\
         \n\
         1. HEADLINE ANALYSIS (20% of feedback):\n\
         - DIRECTLY QUOTE the headline: \"{headline}\"\n\
         - Provide specific feedback on this exact headline\n\
         - Suggest specific improvements or praise specific elements\n\
         \n\
         2. USP ANALYSIS (20% of feedback):\n\
         - DIRECTLY QUOTE the USP: \"{usp}\"\n\
         - Comment on how effectively it communicates your brand's unique value\n\
         - Suggest specific improvements or praise specific elements\n\
         \n\
         3. CALL-TO-ACTION ANALYSIS (20% of feedback):\n\
         - DIRECTLY QUOTE the CTA: \"{cta}\"\n\
         - Analyze its effectiveness for your specific audience\n\
         - Suggest specific improvements or praise specific elements\n\
         \n\
         4. CAPTION ANALYSIS (20% of feedback):\n\
         - DIRECTLY QUOTE parts of the caption: \"{caption}...\"\n\
         - Comment on tone, length, engagement potential, and brand alignment\n\
         - Suggest specific improvements or praise specific elements\n\
         \n\
         5. VISUAL ELEMENTS (10% of feedback):\n\
         - Comment on specific elements of the generated image\n\
         - Discuss color scheme, composition, and brand alignment\n\
         - Suggest specific improvements or praise specific elements\n\
         \n\
         6. OVERALL CAMPAIGN EFFECTIVENESS (10% of feedback):\n\
         - How well all elements work together for your specific business\n\
         - Comment on the cohesiveness of the marketing message\n\
         \n\
         Your feedback should be written in first person, as if you (the actual client) wrote it, \
         with your specific voice and concerns. DO NOT mention being a marketing expert - speak \
         purely as the business owner. BE SPECIFIC and DIRECTLY REFERENCE the actual content \
         submitted.\n\
         \n\
         Output Format:\n\
         Feedback: \"...comprehensive, detailed message directly referencing the submitted content...\"\n\
         Score: XX",
        client_name = submission.client_name,
        client_type = submission.client_type,
        personality = submission.personality,
        headline = submission.headline,
        usp = submission.usp,
        cta = submission.cta,
        caption = caption_head,
        elapsed = submission.elapsed_time,
    )
}
