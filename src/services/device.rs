//! Device classification for click events

use woothee::parser::Parser;

use crate::storage::DeviceClass;

/// woothee categories counted as mobile
const MOBILE_CATEGORIES: &[&str] = &["smartphone", "mobilephone"];

/// Classify a request from its `Sec-CH-UA-Mobile` hint and `User-Agent`
///
/// The client hint wins when it says `?1`; otherwise phones and tablets
/// are mobile and everything else (including unknown agents) is desktop.
pub fn classify_device(client_hint_mobile: Option<&str>, user_agent: Option<&str>) -> DeviceClass {
    if client_hint_mobile.is_some_and(|hint| hint.trim() == "?1") {
        return DeviceClass::Mobile;
    }

    let Some(user_agent) = user_agent.filter(|ua| !ua.is_empty()) else {
        return DeviceClass::Desktop;
    };

    if let Some(result) = Parser::new().parse(user_agent)
        && MOBILE_CATEGORIES.contains(&result.category)
    {
        return DeviceClass::Mobile;
    }

    // woothee 没有 tablet 分类
    let lower = user_agent.to_lowercase();
    if lower.contains("tablet") || lower.contains("ipad") {
        return DeviceClass::Mobile;
    }

    DeviceClass::Desktop
}
