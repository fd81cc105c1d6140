/// 公共验证函数模块
/// 提供用户名等输入验证，供用户注册路由使用。

/// 验证用户名格式：2-50 字符，只允许字母、数字、下划线、连字符和空格
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let char_count = username.chars().count();
    if char_count < 2 || char_count > 50 {
        return Err("用户名长度需在2到50个字符之间");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == ' ')
    {
        return Err("用户名只能包含字母、数字、下划线、连字符和空格");
    }
    Ok(())
}
