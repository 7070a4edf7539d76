//! Builders for outgoing client lines.
//!
//! Every builder returns the line without its `\r\n` terminator; the line
//! codec appends it. Carriage returns and line feeds inside user supplied
//! text are replaced by spaces so one call always yields one line.

fn sanitize(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// `CAP REQ :cap1 cap2`
pub fn cap_req(caps: &[&str]) -> String {
    format!("CAP REQ :{}", caps.join(" "))
}

/// `PASS oauth:token`, adding the `oauth:` scheme when it is missing.
pub fn pass(token: &str) -> String {
    let token = sanitize(token);
    if token.starts_with("oauth:") {
        format!("PASS {}", token)
    } else {
        format!("PASS oauth:{}", token)
    }
}

/// `NICK nick`
pub fn nick(nick: &str) -> String {
    format!("NICK {}", sanitize(nick))
}

/// `JOIN #channel`, adding the `#` when it is missing.
pub fn join(channel: &str) -> String {
    format!("JOIN {}", channel_name(channel))
}

/// `PONG :token`
pub fn pong(token: &str) -> String {
    format!("PONG :{}", sanitize(token))
}

/// `PRIVMSG #channel :text`
pub fn privmsg(target: &str, text: &str) -> String {
    format!("PRIVMSG {} :{}", sanitize(target), sanitize(text))
}

/// Normalize a channel name to its lower-cased `#name` form.
pub fn channel_name(channel: &str) -> String {
    let channel = channel.trim().to_lowercase();
    if channel.starts_with('#') {
        channel
    } else {
        format!("#{}", channel)
    }
}
