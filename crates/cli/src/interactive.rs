use crate::commands::build_rng;
use crate::display;
use rand::rngs::StdRng;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use safeher_common::{prompt, Message, RiskAssessment, Role, SystemConfig};
use safeher_history::{HistoryManager, HistoryStore};
use safeher_risk::RiskEngine;

/// One chat session: every assistant reply updates the trend
pub struct Session {
    engine: RiskEngine,
    rng: StdRng,
    manager: HistoryManager,
    conversation: Vec<Message>,
    store: Option<HistoryStore>,
}

impl Session {
    pub fn new(config: &SystemConfig) -> anyhow::Result<Self> {
        let store = config.history.path.as_ref().map(HistoryStore::new);
        let manager = match &store {
            Some(store) => HistoryManager::with_history(&config.history, store.load(config.history.capacity)?),
            None => HistoryManager::new(&config.history),
        };

        Ok(Self {
            engine: RiskEngine::from_config(&config.engine),
            rng: build_rng(config.engine.seed),
            manager,
            conversation: vec![Message::new_assistant(prompt::WELCOME_MESSAGE.to_string())],
            store,
        })
    }

    pub fn add_user(&mut self, text: &str) {
        self.conversation.push(Message::new_user(text.to_string()));
    }

    /// Assess an assistant reply and fold it into the session history
    pub fn add_reply(&mut self, reply: &str) -> anyhow::Result<Option<RiskAssessment>> {
        let assessment = self.engine.assess_with_rng(reply, &mut self.rng);
        self.conversation.push(Message::new_assistant(reply.to_string()));
        self.manager.add_exchange(&self.conversation, assessment.as_ref());

        if assessment.is_some() {
            if let Some(store) = &self.store {
                store.save(self.manager.risk_history())?;
            }
        }
        Ok(assessment)
    }

    pub fn manager(&self) -> &HistoryManager {
        &self.manager
    }

    pub fn conversation(&self) -> &[Message] {
        &self.conversation
    }

    /// Rendered output for one reply
    pub fn render(&self, reply: &str, assessment: Option<&RiskAssessment>) -> String {
        let mut out = self.engine.strip(reply);
        out.push('\n');
        match assessment {
            Some(assessment) => out.push_str(&display::assessment_summary(assessment)),
            None => out.push_str("No risk signal\n"),
        }
        out.push_str(&display::trend_line(self.manager.trend()));
        out
    }
}

fn print_help() {
    println!("Paste an assistant reply to assess it.");
    println!("  > text    record a user message");
    println!("  /history  show recent conversations");
    println!("  /prompt   show the assistant system prompt");
    println!("  /context  show what the model would receive next turn");
    println!("  exit      leave");
}

fn print_context(session: &Session) {
    for message in prompt::model_context(session.conversation()) {
        let role = match message.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        let first_line = message.content.lines().next().unwrap_or_default();
        println!("{:>9}: {}", role, first_line);
    }
}

fn print_summaries(session: &Session) {
    if session.manager().summaries().is_empty() {
        println!("No conversations yet");
        return;
    }
    for summary in session.manager().summaries().iter() {
        println!(
            "{}  {:<6} {:>3} msgs  {}",
            summary.timestamp.format("%H:%M"),
            summary.risk_level,
            summary.message_count,
            summary.topic_summary
        );
    }
}

pub fn run(config: &SystemConfig) -> anyhow::Result<()> {
    let mut session = Session::new(config)?;
    let mut rl = DefaultEditor::new()?;

    println!("SafeHer - Interactive Mode");
    println!("{}", safeher_risk::remove_risk_tag(prompt::WELCOME_MESSAGE));
    println!("Type /help for commands");

    loop {
        let line = match rl.readline("safeher> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        match line {
            "exit" | "quit" => break,
            "/help" => print_help(),
            "/history" => print_summaries(&session),
            "/prompt" => println!("{}", prompt::SAFETY_SYSTEM_PROMPT),
            "/context" => print_context(&session),
            _ => {
                if let Some(user_text) = line.strip_prefix('>') {
                    session.add_user(user_text.trim());
                    continue;
                }
                let assessment = session.add_reply(line)?;
                println!("{}", session.render(line, assessment.as_ref()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use safeher_common::Level;
    use safeher_history::RiskTrend;
    use tempfile::TempDir;

    fn config() -> SystemConfig {
        let mut config = SystemConfig::default();
        config.engine.seed = Some(42);
        config
    }

    #[test]
    fn test_session_starts_with_welcome() {
        let session = Session::new(&config()).unwrap();

        assert_eq!(session.conversation().len(), 1);
        assert_eq!(session.manager().current_percentage(), 15);
    }

    #[test]
    fn test_session_tracks_trend() {
        let mut session = Session::new(&config()).unwrap();
        session.add_user("A car keeps circling the block");

        let first = session.add_reply("Note the plate. [RISK: MEDIUM - 40%]").unwrap();
        assert_eq!(first.unwrap().level, Level::Medium);

        session.add_user("It stopped and someone got out");
        let reply = "Go inside now. [RISK: HIGH - 80%]";
        let second = session.add_reply(reply).unwrap();

        assert_eq!(session.manager().trend(), RiskTrend::Increasing);
        let rendered = session.render(reply, second.as_ref());
        assert!(rendered.starts_with("Go inside now.\nRisk: HIGH - 80%"));
        assert!(rendered.ends_with("Trend: ↑ increasing"));
        assert_eq!(session.manager().summaries().len(), 2);
    }

    #[test]
    fn test_session_persists_readings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        let mut config = config();
        config.history.path = Some(path.clone());

        let mut session = Session::new(&config).unwrap();
        session.add_reply("[RISK: LOW - 10%]").unwrap();
        session.add_reply("Nothing to see here").unwrap();

        let stored = HistoryStore::new(&path).load(5).unwrap();
        assert_eq!(stored.len(), 1);

        let resumed = Session::new(&config).unwrap();
        assert_eq!(resumed.manager().current_percentage(), 10);
    }
}
