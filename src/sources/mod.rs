pub mod otakudesu;
