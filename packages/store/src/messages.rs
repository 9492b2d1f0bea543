//! User-facing text. The app ships in Portuguese.

pub const FILL_ALL_FIELDS: &str = "Por favor, preencha todos os campos.";
pub const SIGN_IN_FAILED: &str = "Falha no login. Verifique as suas credenciais.";
pub const SIGN_UP_FAILED: &str = "Falha no registo. Tente novamente.";
pub const AUTO_LOGIN_FAILED: &str = "Registo bem-sucedido, mas o login automático falhou.";
pub const CONNECTION_FAILED: &str = "Erro de conexão. Verifique a sua internet e o endereço da API.";

pub const LOAD_FAILED: &str = "Não foi possível carregar os seus dados. Tente novamente.";
pub const NO_POINTS: &str = "Você ainda não tem pontos.";
pub const NO_REWARDS: &str = "Nenhum prémio disponível.";
pub const QR_UNAVAILABLE: &str = "QR Code não disponível";

pub const ALERT_ERROR: &str = "Erro";
pub const ALERT_SUCCESS: &str = "Sucesso!";
pub const CONFIRM_REDEEM_TITLE: &str = "Confirmar Resgate";
pub const REDEEM_FAILED: &str = "Não foi possível resgatar o prémio.";
pub const REDEEM_CONNECTION_FAILED: &str = "Ocorreu um erro de conexão.";

pub fn confirm_redeem(reward_name: &str) -> String {
    format!(
        "Tem a certeza que deseja resgatar o prémio \"{reward_name}\"? Os seus pontos serão deduzidos."
    )
}

pub fn redeemed(reward_name: &str) -> String {
    format!("Prémio \"{reward_name}\" resgatado com sucesso.")
}

pub fn shortfall(points: i64) -> String {
    format!("{points} pontos em falta")
}
