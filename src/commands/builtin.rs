use super::CommandResult;
use crate::repl::Repl;
use crate::ui::UI;
use chatkeep::error::Result;
use chatkeep::session::{Message, Role};

pub fn exit_command(repl: &mut Repl) -> Result<CommandResult> {
    repl.save()?;
    UI::print_goodbye();
    Ok(CommandResult::Exit)
}

pub fn new_command(repl: &mut Repl) -> Result<CommandResult> {
    repl.handle_new_chat();
    Ok(CommandResult::Continue)
}

pub fn list_command(repl: &mut Repl) -> Result<CommandResult> {
    repl.handle_list();
    Ok(CommandResult::Continue)
}

pub fn switch_command(repl: &mut Repl, arg: &str) -> Result<CommandResult> {
    if let Err(e) = repl.handle_switch(arg) {
        UI::print_error_with_hint(&e);
    }
    Ok(CommandResult::Continue)
}

pub fn show_command(repl: &mut Repl) -> Result<CommandResult> {
    if let Err(e) = repl.handle_show() {
        UI::print_error_with_hint(&e);
    }
    Ok(CommandResult::Continue)
}

pub fn system_command(repl: &mut Repl, text: &str) -> Result<CommandResult> {
    append_with_role(repl, Role::System, text)
}

pub fn assistant_command(repl: &mut Repl, text: &str) -> Result<CommandResult> {
    append_with_role(repl, Role::Assistant, text)
}

pub fn help_command() -> Result<CommandResult> {
    UI::print_help();
    Ok(CommandResult::Continue)
}

fn append_with_role(repl: &mut Repl, role: Role, text: &str) -> Result<CommandResult> {
    if text.is_empty() {
        UI::print_warning(&format!("Usage: /{} TEXT", role));
        return Ok(CommandResult::Continue);
    }

    if let Err(e) = repl.append(Message::new(role, text)) {
        UI::print_error_with_hint(&e);
    }
    Ok(CommandResult::Continue)
}
