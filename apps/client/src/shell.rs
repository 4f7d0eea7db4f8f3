//! Interactive shell standing in for the browser routes.
//!
//! Each command maps to a page action: auth (login/register), the paginated
//! category and vocabulary pages, the flashcard session, and the quiz
//! session with its history table. Store failures are rendered inline as
//! their fixed messages, never propagated as process errors.

use std::io::{BufRead, Write};

use vocab_core::{
    paginate, CategoryFilter, FlashcardSession, NewCategory, NewUser, NewVocab, QuizPhase,
    QuizSession, Vocab,
};

use crate::state::AppState;

const CATEGORY_PAGE_SIZE: usize = 5;
const VOCAB_PAGE_SIZE: usize = 10;

const HELP: &str = "\
Commands:
  register <first> <last> <email> <password>
  login <email> <password>          logout            whoami
  refresh                           reload all collections
  categories [page]                 paginated category list
  category add <name> [description...]
  category edit <id> <name> [description...]
  category rm <id>
  vocabs [page]                     paginated word list (search + filter apply)
  vocab add <categoryId> <word> <meaning...>
  vocab edit <id> <categoryId> <word> <meaning...>
  vocab rm <id>
  search [text...]                  word filter; empty clears it
  filter <categoryId>               0 = all categories
  flash [flip|next|prev|learn]      flashcard session
  quiz start|answer <1|2>|next|prev|finish|again|history
  quit";

/// Line-oriented UI shell over the application state.
pub struct Shell {
    state: AppState,
    category_page: usize,
    vocab_page: usize,
    search: String,
    filter: CategoryFilter,
    flashcards: FlashcardSession,
    quiz: QuizSession,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            category_page: 1,
            vocab_page: 1,
            search: String::new(),
            filter: CategoryFilter::All,
            flashcards: FlashcardSession::new(),
            quiz: QuizSession::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Read commands from stdin until `quit` or EOF.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("VocabApp - type 'help' for commands");
        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("> ");
            std::io::stdout().flush()?;
            let Some(line) = lines.next() else { break };
            let line = line?;
            match self.handle_line(line.trim()).await {
                Some(reply) => {
                    if !reply.is_empty() {
                        println!("{reply}");
                    }
                }
                None => break,
            }
        }
        Ok(())
    }

    /// Dispatch one command line. `None` means quit.
    pub async fn handle_line(&mut self, line: &str) -> Option<String> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Some(String::new());
        };
        let args: Vec<&str> = parts.collect();

        let reply = match command {
            "help" => HELP.to_string(),
            "quit" | "exit" => return None,
            "register" => self.register(&args).await,
            "login" => self.login(&args).await,
            _ => {
                // route guard: everything below needs a session
                if self.state.require_user().is_none() {
                    return Some("Please log in first.".to_string());
                }
                match command {
                    "logout" => self.logout(),
                    "whoami" => self.whoami(),
                    "refresh" => self.refresh().await,
                    "categories" => self.categories_page(&args),
                    "category" => self.category_command(&args).await,
                    "vocabs" => self.vocabs_page(&args),
                    "vocab" => self.vocab_command(&args).await,
                    "search" => self.set_search(&args),
                    "filter" => self.set_filter(&args),
                    "flash" => self.flash_command(&args).await,
                    "quiz" => self.quiz_command(&args).await,
                    _ => format!("Unknown command '{command}'. Type 'help'."),
                }
            }
        };
        Some(reply)
    }

    // === auth ===

    async fn register(&mut self, args: &[&str]) -> String {
        let [first_name, last_name, email, password] = args else {
            return "Usage: register <first> <last> <email> <password>".to_string();
        };
        if !email.contains('@') || !email.contains('.') {
            return "invalid email".to_string();
        }
        if password.len() < 8 {
            return "password must be at least 8 characters".to_string();
        }

        let payload = NewUser {
            first_name: (*first_name).to_string(),
            last_name: (*last_name).to_string(),
            email: (*email).to_string(),
            password: (*password).to_string(),
        };
        match self.state.auth.register(&self.state.api, payload).await {
            Ok(()) => "Account created. You can log in now.".to_string(),
            Err(e) => e.to_string(),
        }
    }

    async fn login(&mut self, args: &[&str]) -> String {
        let [email, password] = args else {
            return "Usage: login <email> <password>".to_string();
        };
        let greeting = {
            let AppState {
                api, storage, auth, ..
            } = &mut self.state;
            match auth.login(api, storage, email, password).await {
                Ok(user) => format!(
                    "Welcome, {}!",
                    user.first_name.as_deref().unwrap_or(&user.email)
                ),
                Err(e) => return e.to_string(),
            }
        };
        let refresh = self.refresh().await;
        format!("{greeting}\n{refresh}")
    }

    fn logout(&mut self) -> String {
        let AppState { storage, auth, .. } = &mut self.state;
        auth.logout(storage);
        "Logged out.".to_string()
    }

    fn whoami(&self) -> String {
        match self.state.require_user() {
            Some(user) => format!(
                "{} {} <{}>",
                user.first_name.as_deref().unwrap_or(""),
                user.last_name.as_deref().unwrap_or(""),
                user.email
            ),
            None => "Not logged in.".to_string(),
        }
    }

    async fn refresh(&mut self) -> String {
        let mut errors = Vec::new();
        if let Err(e) = self.state.categories.fetch(&self.state.api).await {
            errors.push(e.to_string());
        }
        if let Err(e) = self.state.vocabs.fetch(&self.state.api).await {
            errors.push(e.to_string());
        }
        if let Err(e) = self.state.results.fetch(&self.state.api).await {
            errors.push(e.to_string());
        }
        if errors.is_empty() {
            format!(
                "Loaded {} categories, {} words, {} results.",
                self.state.categories.categories.len(),
                self.state.vocabs.vocabs.len(),
                self.state.results.results.len()
            )
        } else {
            errors.join("\n")
        }
    }

    // === categories page ===

    fn categories_page(&mut self, args: &[&str]) -> String {
        if let Some(page) = args.first().and_then(|p| p.parse().ok()) {
            self.category_page = page;
        }
        let page = paginate(
            &self.state.categories.categories,
            self.category_page,
            CATEGORY_PAGE_SIZE,
        );
        if page.is_empty() {
            return "No categories.".to_string();
        }
        let mut out: Vec<String> = page
            .items
            .iter()
            .map(|c| {
                format!(
                    "{:>4}  {:<20} {}",
                    c.id,
                    c.name,
                    c.description.as_deref().unwrap_or("")
                )
            })
            .collect();
        out.push(format!("Page {}/{}", self.category_page, page.total_pages));
        out.join("\n")
    }

    async fn category_command(&mut self, args: &[&str]) -> String {
        match args {
            ["add", name, description @ ..] => {
                let payload = NewCategory {
                    name: (*name).to_string(),
                    description: join_opt(description),
                };
                match self.state.categories.add(&self.state.api, payload).await {
                    Ok(()) => "Category added.".to_string(),
                    Err(e) => e.to_string(),
                }
            }
            ["edit", id, name, description @ ..] => {
                let Ok(id) = id.parse() else {
                    return "Invalid category id.".to_string();
                };
                let payload = NewCategory {
                    name: (*name).to_string(),
                    description: join_opt(description),
                };
                match self.state.categories.update(&self.state.api, id, payload).await {
                    Ok(()) => "Category updated.".to_string(),
                    Err(e) => e.to_string(),
                }
            }
            ["rm", id] => {
                let Ok(id) = id.parse() else {
                    return "Invalid category id.".to_string();
                };
                // no cascade: vocabs keep the dangling reference and display
                // an empty category name
                match self.state.categories.delete(&self.state.api, id).await {
                    Ok(()) => "Category deleted.".to_string(),
                    Err(e) => e.to_string(),
                }
            }
            _ => "Usage: category add|edit|rm ...".to_string(),
        }
    }

    // === vocabulary page ===

    fn filtered_vocabs(&self) -> Vec<&Vocab> {
        let search = self.search.to_lowercase();
        self.state
            .vocabs
            .vocabs
            .iter()
            .filter(|v| v.word.to_lowercase().contains(&search))
            .filter(|v| self.filter.matches(v))
            .collect()
    }

    fn vocabs_page(&mut self, args: &[&str]) -> String {
        if let Some(page) = args.first().and_then(|p| p.parse().ok()) {
            self.vocab_page = page;
        }
        let filtered = self.filtered_vocabs();
        let page = paginate(&filtered, self.vocab_page, VOCAB_PAGE_SIZE);
        if page.is_empty() {
            return "No words available.".to_string();
        }
        let mut out: Vec<String> = page
            .items
            .iter()
            .map(|v| {
                format!(
                    "{:>4}  {:<16} {:<24} {:<14} {}",
                    v.id,
                    v.word,
                    v.meaning,
                    self.state.categories.name_of(v.category_id),
                    if v.learned() { "Learned" } else { "Not Learned" }
                )
            })
            .collect();
        out.push(format!("Page {}/{}", self.vocab_page, page.total_pages));
        out.join("\n")
    }

    async fn vocab_command(&mut self, args: &[&str]) -> String {
        match args {
            ["add", category_id, word, meaning @ ..] if !meaning.is_empty() => {
                let Ok(category_id) = category_id.parse() else {
                    return "Invalid category id.".to_string();
                };
                let payload = NewVocab {
                    word: (*word).to_string(),
                    meaning: meaning.join(" "),
                    category_id,
                    is_learned: None,
                };
                match self.state.vocabs.add(&self.state.api, payload).await {
                    Ok(()) => "Word added.".to_string(),
                    Err(e) => e.to_string(),
                }
            }
            ["edit", id, category_id, word, meaning @ ..] if !meaning.is_empty() => {
                let (Ok(id), Ok(category_id)) = (id.parse(), category_id.parse()) else {
                    return "Invalid id.".to_string();
                };
                let payload = NewVocab {
                    word: (*word).to_string(),
                    meaning: meaning.join(" "),
                    category_id,
                    is_learned: None,
                };
                match self.state.vocabs.update(&self.state.api, id, payload).await {
                    Ok(()) => "Word updated.".to_string(),
                    Err(e) => e.to_string(),
                }
            }
            ["rm", id] => {
                let Ok(id) = id.parse() else {
                    return "Invalid id.".to_string();
                };
                match self.state.vocabs.delete(&self.state.api, id).await {
                    Ok(()) => "Word deleted.".to_string(),
                    Err(e) => e.to_string(),
                }
            }
            _ => "Usage: vocab add|edit|rm ...".to_string(),
        }
    }

    fn set_search(&mut self, args: &[&str]) -> String {
        self.search = args.join(" ");
        // re-filtering resets pagination
        self.vocab_page = 1;
        if self.search.is_empty() {
            "Search cleared.".to_string()
        } else {
            format!("Searching for '{}'.", self.search)
        }
    }

    fn set_filter(&mut self, args: &[&str]) -> String {
        let Some(Ok(id)) = args.first().map(|a| a.parse()) else {
            return "Usage: filter <categoryId> (0 = all)".to_string();
        };
        self.filter = CategoryFilter::from_id(id);
        self.vocab_page = 1;
        self.flashcards.set_filter(self.filter);
        match self.filter {
            CategoryFilter::All => "Filter: all categories.".to_string(),
            CategoryFilter::Category(id) => {
                format!("Filter: {}", self.state.categories.name_of(id))
            }
        }
    }

    // === flashcards page ===

    async fn flash_command(&mut self, args: &[&str]) -> String {
        match args {
            [] => {}
            ["flip"] => self.flashcards.flip(),
            ["next"] => self.flashcards.next(&self.state.vocabs.vocabs),
            ["prev"] => self.flashcards.prev(),
            ["learn"] => {
                let Some(id) = self.flashcards.mark_learned_target(&self.state.vocabs.vocabs)
                else {
                    return "Nothing to mark.".to_string();
                };
                if let Err(e) = self.state.vocabs.mark_learned(&self.state.api, id).await {
                    return e.to_string();
                }
            }
            _ => return "Usage: flash [flip|next|prev|learn]".to_string(),
        }
        self.flash_view()
    }

    fn flash_view(&self) -> String {
        let vocabs = &self.state.vocabs.vocabs;
        let progress = self.flashcards.progress(vocabs);
        let card = match self.flashcards.current(vocabs) {
            Some(v) => {
                let face = if self.flashcards.is_flipped() {
                    &v.meaning
                } else {
                    &v.word
                };
                format!(
                    "[{}/{}] {face}{}",
                    self.flashcards.index() + 1,
                    progress.total,
                    if v.learned() { "  (learned)" } else { "" }
                )
            }
            None => "No words available".to_string(),
        };
        format!(
            "{card}\nProgress: {}/{} ({:.0}%)",
            progress.learned,
            progress.total,
            progress.percent()
        )
    }

    // === quiz page ===

    async fn quiz_command(&mut self, args: &[&str]) -> String {
        match args {
            ["start"] => {
                match self.quiz.start(&self.state.vocabs.vocabs, self.filter) {
                    Ok(()) => self.quiz_view(),
                    Err(e) => e.to_string(),
                }
            }
            ["answer", option] => {
                if self.quiz.phase() != QuizPhase::InProgress {
                    return "No quiz in progress. Use 'quiz start'.".to_string();
                }
                // the page locks a question once a choice is made
                if self.quiz.current_answered() {
                    return "Already answered. Use 'quiz next'.".to_string();
                }
                let Some(choice) = option.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
                else {
                    return "Usage: quiz answer <1|2>".to_string();
                };
                match self.quiz.select_answer(choice) {
                    Ok(()) => {
                        let question = self.quiz.current_question().expect("in progress");
                        if question.is_correct(choice) {
                            "Correct!".to_string()
                        } else {
                            format!("Wrong. The answer is '{}'.", question.correct)
                        }
                    }
                    Err(e) => e.to_string(),
                }
            }
            ["next"] => match self.quiz.next() {
                Ok(()) => self.quiz_view(),
                Err(e) => e.to_string(),
            },
            ["prev"] => match self.quiz.prev() {
                Ok(()) => self.quiz_view(),
                Err(e) => e.to_string(),
            },
            ["finish"] => {
                let result = match self.quiz.finish() {
                    Ok(result) => result,
                    Err(e) => return e.to_string(),
                };
                let summary = format!(
                    "Quiz completed! Score: {}/{}",
                    result.score, result.total
                );
                match self.state.results.add(&self.state.api, result).await {
                    Ok(()) => summary,
                    Err(e) => format!("{summary}\n{e}"),
                }
            }
            ["again"] => {
                self.quiz.reset();
                "Ready. Use 'quiz start' to try again.".to_string()
            }
            ["history"] => self.quiz_history(),
            _ => "Usage: quiz start|answer <1|2>|next|prev|finish|again|history".to_string(),
        }
    }

    fn quiz_view(&self) -> String {
        let Some(question) = self.quiz.current_question() else {
            return "No quiz in progress.".to_string();
        };
        let marker = |i: usize| {
            if self.quiz.answer(self.quiz.current_index()) == Some(i) {
                "*"
            } else {
                " "
            }
        };
        format!(
            "Question {}/{}\nWhat is the meaning of \"{}\"?\n {}1) {}\n {}2) {}",
            self.quiz.current_index() + 1,
            self.quiz.len(),
            question.word,
            marker(0),
            question.options[0],
            marker(1),
            question.options[1],
        )
    }

    fn quiz_history(&self) -> String {
        if self.state.results.results.is_empty() {
            return "No quiz history.".to_string();
        }
        self.state
            .results
            .results
            .iter()
            .map(|r| {
                // unknown ids (filter 0, deleted categories) render as "All"
                let name = match self.state.categories.name_of(r.category_id) {
                    "" => "All",
                    name => name,
                };
                format!(
                    "{}  {:<14} {}/{}",
                    r.date.format("%Y-%m-%d"),
                    name,
                    r.score,
                    r.total
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn join_opt(parts: &[&str]) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_core::{QuizResult, User};

    use crate::api::ApiClient;
    use crate::storage::SessionStorage;

    fn shell() -> Shell {
        let dir = std::env::temp_dir().join("vocabapp-shell-test-session.json");
        let state = AppState::new(
            ApiClient::new("http://localhost:1"),
            SessionStorage::new(dir),
        );
        Shell::new(state)
    }

    fn logged_in_shell() -> Shell {
        let mut shell = shell();
        shell.state.auth.current_user = Some(User {
            id: 1,
            email: "ann@example.com".to_string(),
            first_name: None,
            last_name: None,
            password: None,
        });
        shell
    }

    #[tokio::test]
    async fn test_guard_blocks_pages_without_login() {
        let mut shell = shell();
        for command in ["categories", "vocabs", "flash", "quiz history", "whoami"] {
            let reply = shell.handle_line(command).await.unwrap();
            assert_eq!(reply, "Please log in first.");
        }
    }

    #[tokio::test]
    async fn test_register_validation() {
        let mut shell = shell();
        let reply = shell
            .handle_line("register Ann Lee not-an-email longenough")
            .await
            .unwrap();
        assert_eq!(reply, "invalid email");

        let reply = shell
            .handle_line("register Ann Lee ann@example.com short")
            .await
            .unwrap();
        assert_eq!(reply, "password must be at least 8 characters");
    }

    #[tokio::test]
    async fn test_search_and_filter_reset_vocab_page() {
        let mut shell = logged_in_shell();
        for i in 0..15 {
            shell.state.vocabs.vocabs.push(Vocab {
                id: i,
                word: format!("word{i}"),
                meaning: format!("meaning{i}"),
                category_id: 1,
                is_learned: None,
            });
        }

        let reply = shell.handle_line("vocabs 2").await.unwrap();
        assert!(reply.ends_with("Page 2/2"), "{reply}");

        // every word matches, so only the page should change
        shell.handle_line("search word").await.unwrap();
        let reply = shell.handle_line("vocabs").await.unwrap();
        assert!(reply.ends_with("Page 1/2"), "{reply}");

        shell.handle_line("vocabs 2").await.unwrap();
        shell.handle_line("filter 1").await.unwrap();
        let reply = shell.handle_line("vocabs").await.unwrap();
        assert!(reply.ends_with("Page 1/2"), "{reply}");
    }

    #[tokio::test]
    async fn test_history_falls_back_to_all_for_unknown_category() {
        let mut shell = logged_in_shell();
        for category_id in [0, 99] {
            shell.state.results.results.push(QuizResult {
                date: chrono::Utc::now(),
                category_id,
                score: 1,
                total: 2,
            });
        }

        let reply = shell.handle_line("quiz history").await.unwrap();
        for line in reply.lines() {
            assert!(line.contains("All"), "{line}");
            assert!(line.ends_with("1/2"), "{line}");
        }
    }

    #[tokio::test]
    async fn test_quit_and_unknown_command() {
        let mut shell = shell();
        assert!(shell.handle_line("quit").await.is_none());
        assert!(shell.handle_line("").await.unwrap().is_empty());
    }
}
