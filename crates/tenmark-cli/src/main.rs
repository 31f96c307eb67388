use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use tenmark_application::{CampaignFields, Wizard};
use tenmark_core::{ClientRegistry, Step, secret, timer};
use tenmark_interaction::GenerationGateway;

/// The main entry point for the Tenmark wizard terminal application.
///
/// Drives the wizard step by step:
/// 1. Optional access-code gate (static shared secret from the config)
/// 2. Welcome and name intake
/// 3. Client selection and brief
/// 4. Timed campaign form with poster generation
/// 5. Caption with AI suggestion, mockup review, submission
/// 6. Feedback screen with score, then play again or quit
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = ClientRegistry::load_or_builtin();
    let gateway = Arc::new(GenerationGateway::from_secrets(registry.clone()));
    if !gateway.has_text_capability() {
        println!(
            "{}",
            "Provider AI tidak dikonfigurasi - konten fallback akan digunakan.".yellow()
        );
    }
    let wizard = Wizard::new(gateway, registry);

    let mut rl = DefaultEditor::new()?;

    println!("{}", "=== 10 Minutes Marketer ===".bright_magenta().bold());
    println!(
        "{}",
        "Rasakan pengalaman sebagai Social Media Marketer! Buat postingan Instagram \
         untuk klien dalam waktu kurang dari 10 menit."
            .bright_black()
    );
    println!();

    if !access_gate(&mut rl)? {
        return Ok(());
    }

    // Suggestion produced when the poster is accepted, consumed on the
    // caption screen.
    let mut caption_suggestion: Option<String> = None;

    loop {
        match wizard.current_step().await {
            Step::Welcome => {
                let Some(name) = read_required(&mut rl, "Siapa nama Anda? ")? else {
                    break;
                };
                if let Err(err) = wizard.begin(&name).await {
                    eprintln!("{}", format!("Error: {err}").red());
                }
            }

            Step::ClientSelect => {
                println!("{}", "Pilih Klien Anda".bright_yellow().bold());
                println!(
                    "{}",
                    "Pilih klien untuk bekerja sama dalam kampanye media sosial mereka"
                        .bright_black()
                );
                let clients: Vec<_> = wizard.available_clients().to_vec();
                for (i, client) in clients.iter().enumerate() {
                    println!(
                        "  {} {} ({} • {})",
                        format!("{}.", i + 1).bold(),
                        client.name.bright_cyan(),
                        client.client_type,
                        client.personality
                    );
                    println!("     {}", client.description.bright_black());
                }
                let Some(choice) = read_required(&mut rl, "Klien (nomor atau nama): ")? else {
                    break;
                };
                let name = match choice.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= clients.len() => clients[n - 1].name.clone(),
                    _ => choice,
                };
                if let Err(err) = wizard.select_client(&name).await {
                    eprintln!("{}", format!("Error: {err}").red());
                }
            }

            Step::Brief => {
                let state = wizard.snapshot().await;
                if let Some(client) = &state.client {
                    println!("{}", "Brief Anda".bright_yellow().bold());
                    println!(
                        "{} ({} • {})",
                        client.name.bright_cyan().bold(),
                        client.client_type,
                        client.personality
                    );
                }
                println!("{}", format!("\"{}\"", wizard.current_brief().await).italic());
                println!();
                println!(
                    "{}",
                    "Anda memiliki 10 menit untuk membuat postingan Instagram. Isi formulir \
                     kampanye, hasilkan gambar poster, tulis caption, dan kirimkan pekerjaan \
                     Anda untuk mendapatkan umpan balik."
                        .bright_black()
                );
                let Some(_) =
                    read_line(&mut rl, "Tekan Enter untuk mulai (Timer 10:00) ")?
                else {
                    break;
                };
                if let Err(err) = wizard.start_campaign().await {
                    eprintln!("{}", format!("Error: {err}").red());
                }
            }

            Step::CampaignForm => {
                print_countdown(&wizard).await;
                println!("{}", "Campaign Brief".bright_yellow().bold());
                let Some(headline) = read_required(&mut rl, "Headline: ")? else {
                    break;
                };
                let Some(usp) = read_required(&mut rl, "Unique Selling Proposition (USP): ")?
                else {
                    break;
                };
                let Some(cta) = read_required(&mut rl, "Call to Action (CTA): ")? else {
                    break;
                };
                let Some(visual_description) = read_required(&mut rl, "Deskripsi Visual: ")?
                else {
                    break;
                };

                println!("{}", "Tim Desain sedang bekerja...".bright_blue());
                let fields = CampaignFields {
                    headline,
                    usp,
                    cta,
                    visual_description,
                };
                match wizard.generate_poster(fields).await {
                    Ok(image) => {
                        println!("{}", "Gambar yang dihasilkan:".bold());
                        println!("  {}", image.as_str().bright_cyan());
                        let Some(answer) =
                            read_line(&mut rl, "Lanjutkan ke caption? (y = lanjut, n = ulangi) ")?
                        else {
                            break;
                        };
                        if answer.eq_ignore_ascii_case("y") {
                            match wizard.accept_poster().await {
                                Ok(suggestion) => caption_suggestion = Some(suggestion),
                                Err(err) => {
                                    eprintln!("{}", format!("Error: {err}").red())
                                }
                            }
                        }
                    }
                    Err(err) => eprintln!("{}", format!("Error: {err}").red()),
                }
            }

            Step::CaptionInput => {
                print_countdown(&wizard).await;
                println!("{}", "Tulis Caption Anda".bright_yellow().bold());
                if let Some(suggestion) = &caption_suggestion {
                    println!("{}", "Caption yang Disarankan AI:".bold());
                    for line in suggestion.lines() {
                        println!("  {}", line.bright_blue());
                    }
                }
                println!(
                    "{}",
                    "Ketik caption Anda, atau 'g' untuk memakai saran, 'r' untuk saran baru."
                        .bright_black()
                );
                let Some(input) = read_required(&mut rl, "Caption: ")? else {
                    break;
                };
                match input.as_str() {
                    "r" => match wizard.suggest_caption().await {
                        Ok(suggestion) => caption_suggestion = Some(suggestion),
                        Err(err) => eprintln!("{}", format!("Error: {err}").red()),
                    },
                    "g" => {
                        let caption = caption_suggestion.clone().unwrap_or_default();
                        if let Err(err) = wizard.create_mockup(&caption).await {
                            eprintln!("{}", format!("Error: {err}").red());
                        }
                    }
                    caption => {
                        if let Err(err) = wizard.create_mockup(caption).await {
                            eprintln!("{}", format!("Error: {err}").red());
                        }
                    }
                }
            }

            Step::Mockup => {
                print_countdown(&wizard).await;
                print_mockup(&wizard).await;
                let Some(_) = read_line(&mut rl, "Tekan Enter untuk Kirim ke Klien ")? else {
                    break;
                };
                println!("{}", "Menunggu Feedback...".bright_blue());
                if let Err(err) = wizard.submit_to_client().await {
                    eprintln!("{}", format!("Error: {err}").red());
                }
            }

            Step::Feedback => {
                print_feedback(&wizard).await;
                let Some(answer) = read_line(&mut rl, "Main Lagi? (y/n) ")? else {
                    break;
                };
                if answer.eq_ignore_ascii_case("y") {
                    wizard.reset().await;
                    caption_suggestion = None;
                } else {
                    break;
                }
            }
        }
    }

    println!("{}", "Sampai jumpa!".bright_green());
    Ok(())
}

/// Static shared-secret gate. No-op when no access code is configured.
/// Returns false when the user gives up.
fn access_gate(rl: &mut DefaultEditor) -> Result<bool> {
    let Some(code) = secret::load_secret_config()
        .ok()
        .and_then(|config| config.access_code)
    else {
        return Ok(true);
    };

    loop {
        let Some(input) = read_line(rl, "Password: ")? else {
            return Ok(false);
        };
        if input == code {
            return Ok(true);
        }
        eprintln!("{}", "Password salah. Silakan coba lagi.".red());
    }
}

async fn print_countdown(wizard: &Wizard) {
    if let Some(view) = wizard.timer_view().await {
        let rendered = timer::format_mmss(view.remaining);
        let label = if view.remaining < 60 {
            rendered.red().bold()
        } else {
            rendered.bold()
        };
        println!("{} {}", "Sisa Waktu:".bright_black(), label);
    }
}

async fn print_mockup(wizard: &Wizard) {
    let view = wizard.mockup().await;
    let handle = view.client_name.unwrap_or_else(|| "10min.marketer".to_string());

    println!("{}", "Instagram Preview".bright_yellow().bold());
    println!("┌──────────────────────────────────────────┐");
    println!("│ ● {}  {}", handle.bold(), "Sponsored".bright_black());
    println!("├──────────────────────────────────────────┤");
    match view.image {
        Some(image) => println!("│ [gambar] {}", image.as_str().bright_cyan()),
        None => println!("│ [gambar] {}", "Tidak ada gambar tersedia".bright_black()),
    }
    println!("├──────────────────────────────────────────┤");
    let caption = view
        .caption
        .unwrap_or_else(|| "No caption provided".to_string());
    println!("│ {} {}", handle.bold(), caption);
    println!("└──────────────────────────────────────────┘");
}

async fn print_feedback(wizard: &Wizard) {
    let state = wizard.snapshot().await;
    let client_name = state
        .client
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or_default();

    println!("{}", "Client Feedback".bright_yellow().bold());
    println!(
        "{}",
        format!("{client_name} telah memberikan review terhadap postingan Instagram Anda")
            .bright_black()
    );
    if let Some(feedback) = &state.feedback_message {
        println!();
        for line in feedback.lines() {
            println!("  {}", line.italic());
        }
        println!();
    }

    let score = state.score.unwrap_or_default();
    let stars = wizard.star_rating().await;
    let rendered: String = (0..5u8).map(|i| if i < stars { '★' } else { '☆' }).collect();
    println!(
        "{} {}  {}",
        "Skor Anda:".bold(),
        format!("{score}/100").bright_cyan().bold(),
        rendered.yellow()
    );
    println!(
        "{} {}",
        "Waktu Pengerjaan:".bold(),
        timer::format_mmss(state.elapsed_time)
    );
    if state.elapsed_time < timer::TIME_LIMIT_SECS {
        println!(
            "{}",
            "Selesai kurang dari 10 menit! (+10 poin bonus)".bright_green()
        );
    }
}

/// Reads one line. `None` means the user quit (CTRL-D); CTRL-C re-prompts.
fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim().to_string();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(&line);
                }
                return Ok(Some(trimmed));
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Tekan CTRL-D untuk keluar.".yellow());
            }
            Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    }
}

/// Reads one line, re-prompting until it is non-empty. `None` means quit.
fn read_required(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    loop {
        match read_line(rl, prompt)? {
            Some(line) if line.is_empty() => {
                eprintln!("{}", "Input ini diperlukan.".red());
            }
            other => return Ok(other),
        }
    }
}
