//! Tampon de saisie : le nombre en cours de frappe.
//!
//! Contrats :
//! - jamais vide (minimum "0")
//! - au plus un `.` (un point final est permis : "12.")
//! - la FRAPPE s’arrête à `LONGUEUR_MAX` caractères (le surplus est ignoré, pas tronqué)
//!
//! Un résultat réécrit dans le tampon garde sa forme naturelle (`texte_nombre`),
//! éventuellement plus longue ; on ne peut simplement plus l’allonger.

use super::commande::Chiffre;
use super::format::texte_nombre;

/// Longueur maximale atteignable par la frappe.
pub const LONGUEUR_MAX: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tampon {
    texte: String,
}

impl Default for Tampon {
    fn default() -> Self {
        Self::zero()
    }
}

impl Tampon {
    pub fn zero() -> Self {
        Self {
            texte: "0".to_string(),
        }
    }

    /// Nouveau nombre commencé par un chiffre (après un opérateur).
    pub fn depuis_chiffre(c: Chiffre) -> Self {
        Self {
            texte: c.en_char().to_string(),
        }
    }

    /// Nouveau nombre commencé par un point.
    pub fn zero_point() -> Self {
        Self {
            texte: "0.".to_string(),
        }
    }

    /// Résultat (calcul, fonction, MR) réécrit dans le tampon.
    pub fn depuis_nombre(v: f64) -> Self {
        Self {
            texte: texte_nombre(v),
        }
    }

    /// Valeur d’une ligne d’historique : séparateurs retirés, littéral décimal fini exigé.
    pub fn depuis_historique(texte: &str) -> Option<Self> {
        let nettoye: String = texte.trim().chars().filter(|&c| c != ',').collect();
        if !est_litteral_decimal(&nettoye) {
            return None;
        }
        let v: f64 = nettoye.parse().ok()?;
        v.is_finite().then_some(Self { texte: nettoye })
    }

    pub fn as_str(&self) -> &str {
        &self.texte
    }

    pub fn len(&self) -> usize {
        self.texte.len()
    }

    /// Valeur numérique (lecture permissive).
    pub fn valeur(&self) -> f64 {
        parse_permissif(&self.texte)
    }

    /// "Infinity" / "NaN" : formes de résultat qu’on ne prolonge pas à la frappe.
    fn est_numerique(&self) -> bool {
        self.valeur().is_finite()
    }

    /// Ajoute un chiffre ; sans effet au-delà de `LONGUEUR_MAX`.
    pub fn ajouter_chiffre(&mut self, c: Chiffre) {
        if !self.est_numerique() {
            *self = Self::depuis_chiffre(c);
            return;
        }
        if self.texte.len() >= LONGUEUR_MAX {
            return;
        }
        if self.texte == "0" {
            self.texte.clear();
        }
        self.texte.push(c.en_char());
    }

    /// Ajoute le point décimal s’il n’y en a pas encore.
    pub fn ajouter_point(&mut self) {
        if !self.est_numerique() {
            *self = Self::zero_point();
            return;
        }
        if self.texte.contains('.') || self.texte.len() >= LONGUEUR_MAX {
            return;
        }
        self.texte.push('.');
    }

    /// Retire le dernier caractère ; revient à "0" si rien de numérique ne reste.
    pub fn retirer_dernier(&mut self) {
        if self.texte.len() > 1 {
            self.texte.pop();
        } else {
            *self = Self::zero();
            return;
        }

        // "-5" -> "-" ou "Infinity" -> "Infinit" : plus un littéral
        if !est_litteral_decimal(&self.texte) {
            *self = Self::zero();
        }
    }
}

/// `-?chiffres(.chiffres?)?` avec au moins un chiffre avant le point.
fn est_litteral_decimal(s: &str) -> bool {
    let corps = s.strip_prefix('-').unwrap_or(s);
    let (entier, dec) = match corps.split_once('.') {
        Some((e, d)) => (e, d),
        None => (corps, ""),
    };
    !entier.is_empty()
        && entier.bytes().all(|b| b.is_ascii_digit())
        && dec.bytes().all(|b| b.is_ascii_digit())
}

/// Lecture permissive : plus long préfixe numérique (signe, chiffres, point, exposant,
/// ou "Infinity"). Aucun préfixe numérique => NaN.
pub fn parse_permissif(texte: &str) -> f64 {
    let s = texte.trim_start();
    let octets = s.as_bytes();
    let len = octets.len();

    let mut fin = 0;
    if matches!(octets.first(), Some(b'+' | b'-')) {
        fin = 1;
    }

    if s[fin..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let debut = fin;
    while fin < len && octets[fin].is_ascii_digit() {
        fin += 1;
    }
    let mut a_des_chiffres = fin > debut;

    if fin < len && octets[fin] == b'.' {
        fin += 1;
        let debut_dec = fin;
        while fin < len && octets[fin].is_ascii_digit() {
            fin += 1;
        }
        a_des_chiffres |= fin > debut_dec;
    }

    if !a_des_chiffres {
        return f64::NAN;
    }

    // Exposant seulement s’il est complet ("1e" => 1)
    if fin < len && matches!(octets[fin], b'e' | b'E') {
        let mut j = fin + 1;
        if j < len && matches!(octets[j], b'+' | b'-') {
            j += 1;
        }
        let debut_exp = j;
        while j < len && octets[j].is_ascii_digit() {
            j += 1;
        }
        if j > debut_exp {
            fin = j;
        }
    }

    s[..fin].parse().unwrap_or(f64::NAN)
}
